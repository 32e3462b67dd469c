//! # Engine Crate
//!
//! The algorithmic core of the vacancy recommendation system.
//!
//! ## Components
//!
//! ### Collaborative Filter
//! "Users who rated what you rated also liked..." — cosine similarity
//! over co-rated vacancies picks the top-K most similar users, whose
//! highly-rated vacancies become candidates.
//!
//! ### Content Filter
//! Matches vacancy attributes (required qualification, age range) against
//! the target user's profile, failing soft on malformed domain strings.
//!
//! ### Recommender
//! Merges both candidate sources, deduplicates, ranks by posted date, and
//! truncates to a result page.
//!
//! ### Exam Window Selector
//! Date-ranged lookup over a vacancy collection via lower-bound binary
//! search on exam dates.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Snapshot;
//! use engine::{RecommendConfig, Recommender};
//! use std::sync::Arc;
//!
//! let snapshot = Arc::new(Snapshot::load_from_files("data/snapshot".as_ref())?);
//! let recommender = Recommender::with_config(snapshot, RecommendConfig::default());
//!
//! for rec in recommender.recommend(user_id) {
//!     println!("{}: {}", rec.id, rec.topic);
//! }
//! ```
//!
//! Every operation here is a pure, synchronous computation over an
//! immutable snapshot: no I/O, no shared mutable state, independent and
//! safe to run concurrently across requests.

// Public modules
pub mod config;
pub mod similarity;
pub mod collaborative;
pub mod content;
pub mod recommend;
pub mod exam_window;

// Re-export commonly used types
pub use config::{RecommendConfig, default_qualification_ranks};
pub use similarity::{cosine_similarity, rating_map};
pub use collaborative::CollaborativeFilter;
pub use content::{ContentFilter, age_in_range, calculate_age};
pub use recommend::Recommender;
pub use exam_window::vacancies_in_exam_window;
