//! Content-based filtering candidate source.
//!
//! Proposes vacancies whose required qualification and age constraint fit
//! the target user's profile, skipping anything in the caller-supplied
//! exclusion set (typically the user's already-rated vacancies).
//!
//! Matching fails soft throughout: an unknown qualification string or a
//! malformed age-range string is a non-match, never an error. The only
//! hard gate is the profile itself — without both a date of birth and a
//! minimum qualification there is nothing to match against, and the
//! source returns nothing.

use chrono::{Datelike, NaiveDate};
use data_loader::{Snapshot, User, Vacancy, VacancyId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Generates candidates by matching vacancy attributes to the user profile.
pub struct ContentFilter {
    snapshot: Arc<Snapshot>,

    /// Qualification name -> rank; strings outside the table never match
    qualification_ranks: HashMap<String, u32>,
}

/// Whole-year age at `today` with the has-birthday-passed adjustment:
/// the year difference is decremented when the birth month/day has not
/// yet occurred this year.
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Whether `user_age` satisfies a vacancy's age-range string.
///
/// `None` or empty means unconstrained. `"min-max"` with two parseable
/// integers matches inclusively; a single parseable integer requires
/// exact equality; anything else matches nothing.
pub fn age_in_range(user_age: i32, age_range: Option<&str>) -> bool {
    let Some(range) = age_range else {
        return true;
    };
    let range = range.trim();
    if range.is_empty() {
        return true;
    }

    let parts: Vec<&str> = range.split('-').collect();
    if parts.len() == 2 {
        if let (Ok(min_age), Ok(max_age)) =
            (parts[0].trim().parse::<i32>(), parts[1].trim().parse::<i32>())
        {
            return user_age >= min_age && user_age <= max_age;
        }
    }

    if let Ok(exact_age) = range.parse::<i32>() {
        return user_age == exact_age;
    }

    false
}

impl ContentFilter {
    /// Create a new content filter over `snapshot` using `qualification_ranks`
    pub fn new(snapshot: Arc<Snapshot>, qualification_ranks: HashMap<String, u32>) -> Self {
        Self {
            snapshot,
            qualification_ranks,
        }
    }

    /// Generate candidate vacancies for `user`, excluding `excluded` ids.
    ///
    /// `today` is injected rather than read from the clock so age
    /// computations are deterministic under test; the recommender passes
    /// the current date.
    #[instrument(skip(self, user, excluded), fields(user_id = user.id))]
    pub fn candidates(
        &self,
        user: &User,
        excluded: &HashSet<VacancyId>,
        today: NaiveDate,
    ) -> Vec<Vacancy> {
        let (Some(date_of_birth), Some(user_qualification)) =
            (user.date_of_birth, user.minimum_qualification.as_deref())
        else {
            debug!("profile has no date of birth or qualification, skipping content filter");
            return Vec::new();
        };

        let user_age = calculate_age(date_of_birth, today);

        let candidates: Vec<Vacancy> = self
            .snapshot
            .vacancy_ids_sorted()
            .into_iter()
            .filter(|id| !excluded.contains(id))
            .filter_map(|id| self.snapshot.get_vacancy(id))
            .filter(|vacancy| {
                self.qualification_match(user_qualification, vacancy.qualifications.as_deref())
                    && age_in_range(user_age, vacancy.age_range.as_deref())
            })
            .cloned()
            .collect();

        debug!("generated {} content candidates", candidates.len());
        candidates
    }

    /// Whether the user's qualification satisfies the vacancy's requirement.
    ///
    /// No requirement matches unconditionally. Otherwise both strings must
    /// be in the rank table and the user's rank must be at least the
    /// vacancy's.
    fn qualification_match(&self, user_qualification: &str, required: Option<&str>) -> bool {
        let Some(required) = required else {
            return true;
        };
        if required.trim().is_empty() {
            return true;
        }

        match (
            self.qualification_ranks.get(user_qualification),
            self.qualification_ranks.get(required),
        ) {
            (Some(user_rank), Some(vacancy_rank)) => user_rank >= vacancy_rank,
            // Unknown qualification on either side: non-match, not an error
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_qualification_ranks;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vacancy(id: VacancyId, qualifications: Option<&str>, age_range: Option<&str>) -> Vacancy {
        Vacancy {
            id,
            topic: format!("Vacancy {}", id),
            qualifications: qualifications.map(str::to_string),
            age_range: age_range.map(str::to_string),
            posted_date: date(2024, 1, 1),
            exam_date: None,
            application_link: String::new(),
            posted_by: None,
            image_paths: Vec::new(),
        }
    }

    fn profile(date_of_birth: Option<NaiveDate>, qualification: Option<&str>) -> User {
        User {
            id: 1,
            full_name: "Asha Rai".to_string(),
            date_of_birth,
            minimum_qualification: qualification.map(str::to_string),
        }
    }

    fn filter_over(vacancies: Vec<Vacancy>) -> ContentFilter {
        let mut snapshot = Snapshot::new();
        for v in vacancies {
            snapshot.insert_vacancy(v);
        }
        ContentFilter::new(Arc::new(snapshot), default_qualification_ranks())
    }

    // ---- age computation ----

    #[test]
    fn test_age_birthday_already_passed() {
        let dob = date(1994, 3, 10);
        assert_eq!(calculate_age(dob, date(2024, 6, 1)), 30);
    }

    #[test]
    fn test_age_birthday_not_yet_reached() {
        let dob = date(1994, 9, 10);
        assert_eq!(calculate_age(dob, date(2024, 6, 1)), 29);
    }

    #[test]
    fn test_age_on_birthday() {
        let dob = date(1994, 6, 1);
        assert_eq!(calculate_age(dob, date(2024, 6, 1)), 30);
    }

    // ---- age range matching ----

    #[test]
    fn test_range_is_inclusive() {
        assert!(age_in_range(25, Some("25-35")));
        assert!(age_in_range(35, Some("25-35")));
        assert!(!age_in_range(24, Some("25-35")));
        assert!(!age_in_range(36, Some("25-35")));
    }

    #[test]
    fn test_single_age_is_exact() {
        assert!(age_in_range(30, Some("30")));
        assert!(!age_in_range(29, Some("30")));
        assert!(!age_in_range(31, Some("30")));
    }

    #[test]
    fn test_missing_range_matches_everything() {
        assert!(age_in_range(99, None));
        assert!(age_in_range(99, Some("")));
        assert!(age_in_range(99, Some("   ")));
    }

    #[test]
    fn test_malformed_range_matches_nothing() {
        assert!(!age_in_range(30, Some("abc")));
        assert!(!age_in_range(30, Some("25-abc")));
        assert!(!age_in_range(30, Some("20-30-40")));
    }

    // ---- qualification matching ----

    #[test]
    fn test_qualification_rank_ordering() {
        let filter = filter_over(vec![]);
        // Bachelor user is at least as qualified as SEE/+2/Bachelor
        assert!(filter.qualification_match("Bachelor", Some("SEE")));
        assert!(filter.qualification_match("Bachelor", Some("Bachelor")));
        assert!(!filter.qualification_match("Bachelor", Some("Master")));
    }

    #[test]
    fn test_no_required_qualification_always_matches() {
        let filter = filter_over(vec![]);
        assert!(filter.qualification_match("SEE", None));
        assert!(filter.qualification_match("anything at all", Some("")));
    }

    #[test]
    fn test_unknown_qualification_never_matches() {
        let filter = filter_over(vec![]);
        assert!(!filter.qualification_match("PhD", Some("Bachelor")));
        assert!(!filter.qualification_match("Bachelor", Some("Doctorate")));
    }

    // ---- candidate generation ----

    #[test]
    fn test_empty_without_profile_fields() {
        let filter = filter_over(vec![vacancy(1, None, None)]);
        let today = date(2024, 6, 1);
        let excluded = HashSet::new();

        let no_profile = profile(None, None);
        assert!(filter.candidates(&no_profile, &excluded, today).is_empty());

        // Both fields are required, not just one
        let dob_only = profile(Some(date(1994, 3, 10)), None);
        assert!(filter.candidates(&dob_only, &excluded, today).is_empty());

        let qualification_only = profile(None, Some("Bachelor"));
        assert!(filter.candidates(&qualification_only, &excluded, today).is_empty());
    }

    #[test]
    fn test_matching_and_exclusion() {
        let filter = filter_over(vec![
            vacancy(1, Some("Bachelor"), Some("25-35")), // matches
            vacancy(2, Some("Master"), None),            // over-qualified requirement
            vacancy(3, None, Some("18-22")),             // age outside range
            vacancy(4, None, None),                      // unconstrained, matches
            vacancy(5, None, None),                      // matches, but excluded
        ]);
        // User is 30 with a Bachelor
        let user = profile(Some(date(1994, 3, 10)), Some("Bachelor"));
        let excluded: HashSet<VacancyId> = [5].into_iter().collect();

        let ids: Vec<VacancyId> = filter
            .candidates(&user, &excluded, date(2024, 6, 1))
            .iter()
            .map(|v| v.id)
            .collect();

        assert_eq!(ids, vec![1, 4]);
    }
}
