//! Collaborative filtering candidate source.
//!
//! "Users who rated what you rated also liked these vacancies."
//!
//! ## Algorithm
//! 1. Build the target user's rating map; no ratings means no signal,
//!    so the source returns nothing.
//! 2. Score every other user by cosine similarity over the co-rated
//!    subspace (see [`crate::similarity`]).
//! 3. Keep positive similarities, order by similarity descending with
//!    ties broken by user id ascending, and take the top K.
//! 4. Collect vacancies those users rated at or above the high-rating
//!    threshold, minus everything the target has already rated.
//! 5. Materialize to full `Vacancy` records in ascending id order.

use crate::similarity::{cosine_similarity, rating_map};
use data_loader::{Rating, Snapshot, UserId, Vacancy, VacancyId};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Generates candidates from the rating history of similar users.
pub struct CollaborativeFilter {
    /// Shared reference to the snapshot (read-only, so no Mutex needed)
    snapshot: Arc<Snapshot>,

    /// Number of most-similar users to draw candidates from
    top_k: usize,

    /// Minimum rating for a similar user's rating to count as "liked"
    high_rating_threshold: i32,
}

impl CollaborativeFilter {
    /// Create a new collaborative filter with default parameters (K=5, threshold=4)
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        Self {
            snapshot,
            top_k: 5,
            high_rating_threshold: 4,
        }
    }

    /// Configure the similar-user count (default: 5)
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Configure the high-rating threshold (default: 4)
    pub fn with_high_rating_threshold(mut self, threshold: i32) -> Self {
        self.high_rating_threshold = threshold;
        self
    }

    /// Generate candidate vacancies for a user.
    ///
    /// Never includes a vacancy the target has already rated.
    #[instrument(skip(self), fields(user_id = target))]
    pub fn candidates(&self, target: UserId) -> Vec<Vacancy> {
        let target_ratings = self.snapshot.get_user_ratings(target);
        if target_ratings.is_empty() {
            debug!("target user has no ratings, no collaborative signal");
            return Vec::new();
        }
        let target_map = rating_map(target_ratings);

        // Step 1: Score every other user against the target
        let similar_users = self.find_similar_users(target, &target_map);
        debug!("found {} similar users", similar_users.len());

        // Step 2: Pool the vacancies those users rated highly
        let rated_by_target: HashSet<VacancyId> = target_map.keys().copied().collect();
        let mut candidate_ids: HashSet<VacancyId> = HashSet::new();
        for &(user_id, _) in &similar_users {
            for rating in self.snapshot.get_user_ratings(user_id) {
                if rating.rating >= self.high_rating_threshold
                    && !rated_by_target.contains(&rating.vacancy_id)
                {
                    candidate_ids.insert(rating.vacancy_id);
                }
            }
        }

        // Step 3: Materialize in ascending id order for determinism
        let candidates: Vec<Vacancy> = self
            .snapshot
            .vacancy_ids_sorted()
            .into_iter()
            .filter(|id| candidate_ids.contains(id))
            .filter_map(|id| self.snapshot.get_vacancy(id).cloned())
            .collect();

        debug!("generated {} collaborative candidates", candidates.len());
        candidates
    }

    /// The top-K users most similar to the target, as (user id, similarity)
    /// pairs ordered by similarity descending, ties by user id ascending.
    ///
    /// Users with zero similarity share no rating signal with the target
    /// and are dropped before the top-K cut.
    fn find_similar_users(
        &self,
        target: UserId,
        target_map: &HashMap<VacancyId, i32>,
    ) -> Vec<(UserId, f64)> {
        let others: Vec<(UserId, &[Rating])> = self
            .snapshot
            .all_user_ratings()
            .filter(|&(user_id, _)| user_id != target)
            .collect();

        let mut similarities: Vec<(UserId, f64)> = others
            .par_iter()
            .map(|&(user_id, ratings)| {
                (user_id, cosine_similarity(target_map, &rating_map(ratings)))
            })
            .filter(|&(_, similarity)| similarity > 0.0)
            .collect();

        similarities.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        similarities.truncate(self.top_k);
        similarities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use data_loader::{Rating, User};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vacancy(id: VacancyId) -> Vacancy {
        Vacancy {
            id,
            topic: format!("Vacancy {}", id),
            qualifications: None,
            age_range: None,
            posted_date: date(2024, 1, 1),
            exam_date: None,
            application_link: String::new(),
            posted_by: None,
            image_paths: Vec::new(),
        }
    }

    fn user(id: UserId) -> User {
        User {
            id,
            full_name: format!("User {}", id),
            date_of_birth: None,
            minimum_qualification: None,
        }
    }

    fn rate(snapshot: &mut Snapshot, user_id: UserId, vacancy_id: VacancyId, rating: i32) {
        snapshot.insert_rating(Rating { user_id, vacancy_id, rating });
    }

    fn create_test_snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new();
        for id in 1..=3 {
            snapshot.insert_user(user(id));
        }
        for id in 1..=10 {
            snapshot.insert_vacancy(vacancy(id));
        }

        // Target user 1 likes vacancies 1-3
        for vacancy_id in 1..=3 {
            rate(&mut snapshot, 1, vacancy_id, 5);
        }

        // User 2 agrees on 1-3 and also liked 4 and 5
        for vacancy_id in 1..=5 {
            rate(&mut snapshot, 2, vacancy_id, 5);
        }

        // User 3 shares nothing with the target, but liked 6
        rate(&mut snapshot, 3, 6, 5);

        snapshot
    }

    #[test]
    fn test_candidates_come_from_similar_users() {
        let snapshot = Arc::new(create_test_snapshot());
        let filter = CollaborativeFilter::new(Arc::clone(&snapshot));

        let ids: Vec<VacancyId> = filter.candidates(1).iter().map(|v| v.id).collect();

        // User 2 is similar and liked 4 and 5; user 3 has no overlap so
        // vacancy 6 must not appear.
        assert_eq!(ids, vec![4, 5]);
    }

    #[test]
    fn test_never_recommends_already_rated() {
        let snapshot = Arc::new(create_test_snapshot());
        let filter = CollaborativeFilter::new(Arc::clone(&snapshot));

        let ids: Vec<VacancyId> = filter.candidates(1).iter().map(|v| v.id).collect();
        for rated in 1..=3 {
            assert!(!ids.contains(&rated));
        }
    }

    #[test]
    fn test_no_ratings_means_no_candidates() {
        let mut snapshot = create_test_snapshot();
        snapshot.insert_user(user(99));
        let filter = CollaborativeFilter::new(Arc::new(snapshot));

        assert!(filter.candidates(99).is_empty());
    }

    #[test]
    fn test_threshold_excludes_lukewarm_ratings() {
        let mut snapshot = create_test_snapshot();
        // User 2 also rated vacancy 7, but only a 3
        rate(&mut snapshot, 2, 7, 3);
        let filter = CollaborativeFilter::new(Arc::new(snapshot)).with_high_rating_threshold(4);

        let ids: Vec<VacancyId> = filter.candidates(1).iter().map(|v| v.id).collect();
        assert!(!ids.contains(&7));
    }

    #[test]
    fn test_top_k_tie_break_by_user_id() {
        let mut snapshot = Snapshot::new();
        for id in [1, 2, 3] {
            snapshot.insert_user(user(id));
        }
        for id in 1..=4 {
            snapshot.insert_vacancy(vacancy(id));
        }

        rate(&mut snapshot, 1, 1, 5);
        // Users 2 and 3 are tied: both rated vacancy 1 identically.
        // With K=1 the lower user id must win, so only vacancy 2 surfaces.
        rate(&mut snapshot, 2, 1, 5);
        rate(&mut snapshot, 2, 2, 5);
        rate(&mut snapshot, 3, 1, 5);
        rate(&mut snapshot, 3, 3, 5);

        let filter = CollaborativeFilter::new(Arc::new(snapshot)).with_top_k(1);
        let ids: Vec<VacancyId> = filter.candidates(1).iter().map(|v| v.id).collect();

        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_zero_similarity_users_are_ignored() {
        let mut snapshot = Snapshot::new();
        snapshot.insert_user(user(1));
        snapshot.insert_user(user(2));
        for id in 1..=3 {
            snapshot.insert_vacancy(vacancy(id));
        }

        rate(&mut snapshot, 1, 1, 5);
        // User 2 never rated vacancy 1: similarity is exactly 0, so their
        // high rating of vacancy 2 contributes nothing.
        rate(&mut snapshot, 2, 2, 5);
        rate(&mut snapshot, 2, 3, 5);

        let filter = CollaborativeFilter::new(Arc::new(snapshot));
        assert!(filter.candidates(1).is_empty());
    }
}
