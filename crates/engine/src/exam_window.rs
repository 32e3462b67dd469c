//! Date-ranged lookup over vacancies by exam date.
//!
//! ## Algorithm
//! 1. Drop vacancies without an exam date and sort the rest ascending —
//!    the selector always re-sorts, it does not trust the input order.
//! 2. Lower-bound binary search for the first exam date >= start
//!    (narrowing the right bound on match, O(log n) comparisons).
//! 3. Linear scan forward collecting exam dates <= end; the matches form
//!    a contiguous run, so no second binary search is needed.

use chrono::NaiveDate;
use data_loader::Vacancy;

/// All vacancies whose exam date falls inside `[start, end]`, ordered by
/// exam date ascending.
///
/// Returns empty when the collection is empty, either bound is absent, or
/// nothing falls inside the window.
pub fn vacancies_in_exam_window(
    vacancies: &[Vacancy],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<Vacancy> {
    let (Some(start), Some(end)) = (start, end) else {
        return Vec::new();
    };
    if vacancies.is_empty() {
        return Vec::new();
    }

    // Keep (exam date, vacancy) pairs so the scan below never touches an
    // absent date.
    let mut dated: Vec<(NaiveDate, Vacancy)> = vacancies
        .iter()
        .filter_map(|v| v.exam_date.map(|d| (d, v.clone())))
        .collect();
    dated.sort_by_key(|&(exam_date, _)| exam_date);

    // Lower bound: smallest index with exam date >= start
    let mut left = 0;
    let mut right = dated.len();
    while left < right {
        let mid = left + (right - left) / 2;
        if dated[mid].0 >= start {
            right = mid;
        } else {
            left = mid + 1;
        }
    }
    if left == dated.len() {
        return Vec::new();
    }

    dated[left..]
        .iter()
        .take_while(|&&(exam_date, _)| exam_date <= end)
        .map(|(_, vacancy)| vacancy.clone())
        .collect()
}
