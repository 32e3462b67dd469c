//! Core domain types for the vacancy dataset.
//!
//! This module defines the fundamental data structures used throughout the system.
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (UserId, VacancyId)
//! - Structs with public fields
//! - `Option<T>` for nullable columns (date of birth, exam date, ...)
//! - Derive macros for common traits
//! - HashMap for efficient lookups

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with vacancy IDs

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a vacancy posting
pub type VacancyId = u32;

// =============================================================================
// User-related Types
// =============================================================================

/// Represents a registered user.
///
/// `date_of_birth` and `minimum_qualification` drive content-based matching;
/// either (or both) may be absent, in which case the content filter skips
/// the user entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    /// One of the qualification rank table keys ("SEE", "+2", "Bachelor",
    /// "Master"). Stored as a free string: unknown values are legal input
    /// and simply never match.
    pub minimum_qualification: Option<String>,
}

// =============================================================================
// Vacancy-related Types
// =============================================================================

/// Represents a job-vacancy posting.
///
/// Immutable during a single recommendation computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: VacancyId,
    pub topic: String,
    /// Required qualification; `None` means the vacancy is open to anyone.
    pub qualifications: Option<String>,
    /// Applicant age constraint: `"min-max"`, a single exact age, or `None`
    /// for no constraint. Malformed strings are tolerated (treated as a
    /// non-match, never an error).
    pub age_range: Option<String>,
    pub posted_date: NaiveDate,
    /// Exam date, if the vacancy has an associated exam scheduled.
    pub exam_date: Option<NaiveDate>,
    pub application_link: String,
    /// The user who posted this vacancy, if known.
    pub posted_by: Option<UserId>,
    /// Paths of attached images (flattened from the image entities owned by
    /// the excluded persistence layer).
    pub image_paths: Vec<String>,
}

// =============================================================================
// Rating Type
// =============================================================================

/// A single rating a user gave to a vacancy (1-5).
///
/// At most one rating per (user, vacancy) pair — `Snapshot::validate`
/// enforces this so the similarity math never double-counts a vacancy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub vacancy_id: VacancyId,
    pub rating: i32,
}

// =============================================================================
// Recommendation Projection
// =============================================================================

/// Projection of a [`Vacancy`] returned to the caller of the recommender.
///
/// Carries the poster's display name (resolved through the users map) and
/// the flattened image paths; has no identity of its own and is derived
/// fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedVacancy {
    pub id: VacancyId,
    pub topic: String,
    pub qualifications: Option<String>,
    pub age_range: Option<String>,
    pub posted_date: NaiveDate,
    pub exam_date: Option<NaiveDate>,
    pub application_link: String,
    /// Display name of the posting user, when the poster is known.
    pub posted_by: Option<String>,
    pub image_paths: Vec<String>,
}

// =============================================================================
// Snapshot - The In-Memory Dataset
// =============================================================================

/// Immutable snapshot of the dataset handed to the recommendation engine.
///
/// The engine never talks to a database: the caller materializes users,
/// vacancies, and ratings up front and the engine computes over this
/// structure. Ratings are grouped by user at insert time so collaborative
/// filtering gets its per-user rating vectors in O(1).
#[derive(Debug, Default)]
pub struct Snapshot {
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) vacancies: HashMap<VacancyId, Vacancy>,
    /// All ratings made by each user
    pub(crate) user_ratings: HashMap<UserId, Vec<Rating>>,
}

impl Snapshot {
    /// Creates a new, empty Snapshot
    pub fn new() -> Self {
        Self::default()
    }

    // Getters - these return references (&T) not owned values (T)

    /// Get a user by ID
    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Get a vacancy by ID
    pub fn get_vacancy(&self, id: VacancyId) -> Option<&Vacancy> {
        self.vacancies.get(&id)
    }

    /// Get all ratings made by a user.
    ///
    /// Returns an empty slice if the user has no ratings.
    pub fn get_user_ratings(&self, user_id: UserId) -> &[Rating] {
        self.user_ratings
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate over every (user, ratings) grouping in the snapshot.
    pub fn all_user_ratings(&self) -> impl Iterator<Item = (UserId, &[Rating])> {
        self.user_ratings.iter().map(|(&id, v)| (id, v.as_slice()))
    }

    /// Iterate over all vacancies (arbitrary order).
    pub fn all_vacancies(&self) -> impl Iterator<Item = &Vacancy> {
        self.vacancies.values()
    }

    /// All vacancy IDs sorted ascending.
    ///
    /// Callers that need a deterministic iteration order (candidate
    /// materialization, CLI listings) go through this.
    pub fn vacancy_ids_sorted(&self) -> Vec<VacancyId> {
        let mut ids: Vec<VacancyId> = self.vacancies.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    // Mutators - used during data loading and by tests

    /// Insert a user into the snapshot
    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Insert a vacancy into the snapshot
    pub fn insert_vacancy(&mut self, vacancy: Vacancy) {
        self.vacancies.insert(vacancy.id, vacancy);
    }

    /// Insert a rating, grouped under its user
    pub fn insert_rating(&mut self, rating: Rating) {
        self.user_ratings
            .entry(rating.user_id)
            .or_default()
            .push(rating);
    }

    /// Get counts for debugging/validation: (users, vacancies, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_ratings = self.user_ratings.values().map(|v| v.len()).sum();
        (self.users.len(), self.vacancies.len(), total_ratings)
    }
}
