//! Cosine similarity between two users' rating vectors.
//!
//! Similarity is computed on the *co-rated subspace*: only vacancies both
//! users have rated contribute to the dot product and to the norms.
//! Ratings outside the intersection carry no signal about agreement, so
//! they are excluded entirely rather than treated as implicit zeros.

use data_loader::{Rating, VacancyId};
use std::collections::HashMap;

/// Build a vacancy-id -> rating map from a user's rating slice.
///
/// The snapshot guarantees at most one rating per (user, vacancy) pair,
/// so no entry is ever overwritten here.
pub fn rating_map(ratings: &[Rating]) -> HashMap<VacancyId, i32> {
    ratings.iter().map(|r| (r.vacancy_id, r.rating)).collect()
}

/// Cosine similarity of two rating maps, in [0, 1] for non-negative scores.
///
/// Returns 0.0 when the users have no commonly-rated vacancy (no signal,
/// not an error) and when either norm over the intersection is zero, which
/// avoids a division-by-zero fault.
pub fn cosine_similarity(a: &HashMap<VacancyId, i32>, b: &HashMap<VacancyId, i32>) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (vacancy_id, &rating_a) in a {
        if let Some(&rating_b) = b.get(vacancy_id) {
            let (ra, rb) = (rating_a as f64, rating_b as f64);
            dot += ra * rb;
            norm_a += ra * ra;
            norm_b += rb * rb;
        }
    }

    // norm_a == 0.0 also covers the empty-intersection case
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
