//! # Recommendation Aggregator
//!
//! Coordinates the two candidate sources into one ranked result page:
//! 1. Resolve the target user profile
//! 2. Run the collaborative and content filters
//! 3. Concatenate collaborative-then-content and deduplicate by vacancy id
//!    (first occurrence wins, so collaborative beats content on ties)
//! 4. Sort by posted date descending and truncate to the result cap
//! 5. Project survivors to [`RecommendedVacancy`] records

use crate::collaborative::CollaborativeFilter;
use crate::config::RecommendConfig;
use crate::content::ContentFilter;
use chrono::{NaiveDate, Utc};
use data_loader::{RecommendedVacancy, Snapshot, UserId, Vacancy, VacancyId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Hybrid recommender combining collaborative and content-based filtering.
pub struct Recommender {
    snapshot: Arc<Snapshot>,
    config: RecommendConfig,
    collaborative: CollaborativeFilter,
    content: ContentFilter,
}

impl Recommender {
    /// Create a recommender over `snapshot` with the default configuration
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        Self::with_config(snapshot, RecommendConfig::default())
    }

    /// Create a recommender with an explicit [`RecommendConfig`]
    pub fn with_config(snapshot: Arc<Snapshot>, config: RecommendConfig) -> Self {
        let collaborative = CollaborativeFilter::new(Arc::clone(&snapshot))
            .with_top_k(config.top_k)
            .with_high_rating_threshold(config.high_rating_threshold);
        let content = ContentFilter::new(
            Arc::clone(&snapshot),
            config.qualification_ranks.clone(),
        );
        Self {
            snapshot,
            config,
            collaborative,
            content,
        }
    }

    /// Recommendations for `target`, ranked and capped, as of today.
    pub fn recommend(&self, target: UserId) -> Vec<RecommendedVacancy> {
        self.recommend_at(target, Utc::now().date_naive())
    }

    /// Recommendations with an explicit reference date for age computation.
    ///
    /// An unknown user yields an empty page, not an error.
    #[instrument(skip(self), fields(user_id = target))]
    pub fn recommend_at(&self, target: UserId, today: NaiveDate) -> Vec<RecommendedVacancy> {
        let Some(user) = self.snapshot.get_user(target) else {
            debug!("user {} not found, returning no recommendations", target);
            return Vec::new();
        };

        let collaborative = self.collaborative.candidates(target);

        // The collaborative source self-excludes rated vacancies; the
        // content source needs the exclusion set handed to it.
        let rated: HashSet<VacancyId> = self
            .snapshot
            .get_user_ratings(target)
            .iter()
            .map(|r| r.vacancy_id)
            .collect();
        let content = self.content.candidates(user, &rated, today);

        debug!(
            collaborative = collaborative.len(),
            content = content.len(),
            "merging candidate sources"
        );

        // Deduplicate keeping the first occurrence in concatenation order
        let mut seen: HashSet<VacancyId> = HashSet::new();
        let mut merged: Vec<Vacancy> = Vec::new();
        for vacancy in collaborative.into_iter().chain(content) {
            if seen.insert(vacancy.id) {
                merged.push(vacancy);
            }
        }

        // Vec::sort_by is stable, so equal dates keep concatenation order
        merged.sort_by(|a, b| b.posted_date.cmp(&a.posted_date));
        merged.truncate(self.config.max_results);

        merged.into_iter().map(|v| self.project(v)).collect()
    }

    /// Flatten a vacancy into its result projection, resolving the poster's
    /// display name through the users map.
    fn project(&self, vacancy: Vacancy) -> RecommendedVacancy {
        let posted_by = vacancy
            .posted_by
            .and_then(|id| self.snapshot.get_user(id))
            .map(|u| u.full_name.clone());

        RecommendedVacancy {
            id: vacancy.id,
            topic: vacancy.topic,
            qualifications: vacancy.qualifications,
            age_range: vacancy.age_range,
            posted_date: vacancy.posted_date,
            exam_date: vacancy.exam_date,
            application_link: vacancy.application_link,
            posted_by,
            image_paths: vacancy.image_paths,
        }
    }
}
