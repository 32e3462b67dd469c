//! Tunable parameters for the recommendation engine.
//!
//! The original system hard-coded the qualification rank table, the top-K
//! similar-user count, and the high-rating threshold (inconsistently: one
//! call path used >= 3, the other >= 4). They live here as one explicit
//! configuration value instead, so behavior is consistent and testable.

use std::collections::HashMap;

/// Configuration for the [`Recommender`](crate::Recommender) and its
/// candidate sources.
#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// Ordered qualification levels, mapped to comparable ranks.
    /// A qualification string absent from this table never matches.
    pub qualification_ranks: HashMap<String, u32>,

    /// Number of most-similar users the collaborative filter draws from.
    pub top_k: usize,

    /// Minimum rating for a similar user's rating to count as "liked".
    pub high_rating_threshold: i32,

    /// Maximum number of recommendations returned per request.
    pub max_results: usize,
}

/// The fixed qualification ladder: SEE < +2 < Bachelor < Master.
pub fn default_qualification_ranks() -> HashMap<String, u32> {
    [("SEE", 1), ("+2", 2), ("Bachelor", 3), ("Master", 4)]
        .into_iter()
        .map(|(name, rank)| (name.to_string(), rank))
        .collect()
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            qualification_ranks: default_qualification_ranks(),
            top_k: 5,
            high_rating_threshold: 4,
            max_results: 10,
        }
    }
}

impl RecommendConfig {
    /// Create a config with the default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the qualification rank table
    pub fn with_qualification_ranks(mut self, ranks: HashMap<String, u32>) -> Self {
        self.qualification_ranks = ranks;
        self
    }

    /// Override the similar-user count (default: 5)
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Override the high-rating threshold (default: 4)
    pub fn with_high_rating_threshold(mut self, threshold: i32) -> Self {
        self.high_rating_threshold = threshold;
        self
    }

    /// Override the result cap (default: 10)
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}
