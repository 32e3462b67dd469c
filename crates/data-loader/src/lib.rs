//! # Data Loader Crate
//!
//! This crate owns the domain types of the vacancy recommendation system
//! and loads dataset snapshots into memory.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (User, Vacancy, Rating, Snapshot)
//! - **parser**: Parse `::`-delimited snapshot files into Rust structs
//! - **index**: Assemble and validate the in-memory Snapshot
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Snapshot;
//! use std::path::Path;
//!
//! // Load the entire dataset
//! let snapshot = Snapshot::load_from_files(Path::new("data/snapshot"))?;
//!
//! // Query data
//! let user = snapshot.get_user(1).unwrap();
//! let ratings = snapshot.get_user_ratings(1);
//!
//! println!("{} rated {} vacancies", user.full_name, ratings.len());
//! ```
//!
//! The engine crate computes over a `Snapshot` but never mutates one: every
//! recommendation request sees an immutable view, which makes the whole
//! pipeline safe to run concurrently across requests.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{Result, SnapshotError};
pub use types::{
    // Type aliases
    UserId,
    VacancyId,
    // Core types
    User,
    Vacancy,
    Rating,
    RecommendedVacancy,
    Snapshot,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_snapshot_creation() {
        let snapshot = Snapshot::new();
        let (users, vacancies, ratings) = snapshot.counts();

        assert_eq!(users, 0);
        assert_eq!(vacancies, 0);
        assert_eq!(ratings, 0);
    }

    #[test]
    fn test_insert_user() {
        let mut snapshot = Snapshot::new();

        snapshot.insert_user(User {
            id: 1,
            full_name: "Asha Rai".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1998, 4, 12),
            minimum_qualification: Some("Bachelor".to_string()),
        });

        let retrieved = snapshot.get_user(1).unwrap();
        assert_eq!(retrieved.id, 1);
        assert_eq!(retrieved.full_name, "Asha Rai");
    }

    #[test]
    fn test_insert_vacancy() {
        let mut snapshot = Snapshot::new();

        snapshot.insert_vacancy(Vacancy {
            id: 10,
            topic: "Staff Nurse".to_string(),
            qualifications: Some("Bachelor".to_string()),
            age_range: Some("21-35".to_string()),
            posted_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            exam_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            application_link: "https://example.org/apply".to_string(),
            posted_by: None,
            image_paths: vec!["a.png".to_string()],
        });

        let retrieved = snapshot.get_vacancy(10).unwrap();
        assert_eq!(retrieved.topic, "Staff Nurse");
        assert_eq!(retrieved.image_paths.len(), 1);
    }

    #[test]
    fn test_insert_rating_groups_by_user() {
        let mut snapshot = Snapshot::new();

        snapshot.insert_rating(Rating { user_id: 1, vacancy_id: 10, rating: 5 });
        snapshot.insert_rating(Rating { user_id: 1, vacancy_id: 11, rating: 3 });
        snapshot.insert_rating(Rating { user_id: 2, vacancy_id: 10, rating: 4 });

        assert_eq!(snapshot.get_user_ratings(1).len(), 2);
        assert_eq!(snapshot.get_user_ratings(2).len(), 1);
    }

    #[test]
    fn test_empty_queries() {
        let snapshot = Snapshot::new();

        // Querying non-existent data should return None or empty slices
        assert!(snapshot.get_user(999).is_none());
        assert!(snapshot.get_vacancy(999).is_none());
        assert!(snapshot.get_user_ratings(999).is_empty());
    }

    #[test]
    fn test_vacancy_ids_sorted() {
        let mut snapshot = Snapshot::new();
        for id in [30, 10, 20] {
            snapshot.insert_vacancy(Vacancy {
                id,
                topic: String::new(),
                qualifications: None,
                age_range: None,
                posted_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                exam_date: None,
                application_link: String::new(),
                posted_by: None,
                image_paths: Vec::new(),
            });
        }

        assert_eq!(snapshot.vacancy_ids_sorted(), vec![10, 20, 30]);
    }
}
