//! Snapshot building and validation logic.
//!
//! This module assembles a [`Snapshot`] from parsed data files:
//! - Parse the three files in parallel with Rayon
//! - Populate the primary maps and per-user rating groupings
//! - Validate referential integrity

use crate::error::{Result, SnapshotError};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;

impl Snapshot {
    /// Load an entire snapshot from a directory.
    ///
    /// This is the main entry point for loading data. Steps:
    /// 1. Parse all three files (users, vacancies, ratings)
    /// 2. Populate the snapshot maps
    /// 3. Validate data integrity
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        let users_path = data_dir.join("users.dat");
        let vacancies_path = data_dir.join("vacancies.dat");
        let ratings_path = data_dir.join("ratings.dat");

        // Parse the three files in parallel; rayon::join runs two closures
        // concurrently, nested to get three-way parallelism.
        let ((users, vacancies), ratings) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_users(&users_path),
                    || parser::parse_vacancies(&vacancies_path),
                )
            },
            || parser::parse_ratings(&ratings_path),
        );

        let users = users?;
        let vacancies = vacancies?;
        let ratings = ratings?;

        let mut snapshot = Snapshot::new();
        for user in users {
            snapshot.insert_user(user);
        }
        for vacancy in vacancies {
            snapshot.insert_vacancy(vacancy);
        }
        for rating in ratings {
            snapshot.insert_rating(rating);
        }

        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Validate snapshot integrity.
    ///
    /// Checks that:
    /// - every rating references an existing user and vacancy
    /// - rating values are in 1..=5
    /// - no (user, vacancy) pair is rated twice — the similarity
    ///   computation assumes at most one rating per pair
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<(UserId, VacancyId)> = HashSet::new();

        for ratings in self.user_ratings.values() {
            for rating in ratings {
                if !self.users.contains_key(&rating.user_id) {
                    return Err(SnapshotError::MissingReference {
                        entity: "User".to_string(),
                        id: rating.user_id,
                    });
                }
                if !self.vacancies.contains_key(&rating.vacancy_id) {
                    return Err(SnapshotError::MissingReference {
                        entity: "Vacancy".to_string(),
                        id: rating.vacancy_id,
                    });
                }
                if !(1..=5).contains(&rating.rating) {
                    return Err(SnapshotError::InvalidValue {
                        field: "rating".to_string(),
                        value: rating.rating.to_string(),
                    });
                }
                if !seen.insert((rating.user_id, rating.vacancy_id)) {
                    return Err(SnapshotError::ValidationError(format!(
                        "duplicate rating for user {} on vacancy {}",
                        rating.user_id, rating.vacancy_id
                    )));
                }
            }
        }
        Ok(())
    }
}
