//! Parsers for the snapshot data files.
//!
//! Three `::`-delimited files make up a snapshot:
//! - users.dat: id::fullName::dateOfBirth::minimumQualification
//! - vacancies.dat: id::topic::qualifications::ageRange::postedDate::examDate::applicationLink::postedBy::imagePaths
//! - ratings.dat: userId::vacancyId::rating
//!
//! An empty field means the value is absent (`None`). Dates are ISO
//! `%Y-%m-%d`. Image paths are `|`-separated inside their field.
//!
//! Unlike the engine's fail-soft handling of domain strings, a malformed
//! *file* is a hard error carrying the file name, line number, and reason.

use crate::error::{Result, SnapshotError};
use crate::types::*;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Split one record into its fields, requiring an exact field count.
fn split_fields<'a>(line: &'a str, file: &str, line_no: usize, expected: usize) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split("::").collect();
    if fields.len() != expected {
        return Err(SnapshotError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("expected {} fields, found {}", expected, fields.len()),
        });
    }
    Ok(fields)
}

/// Empty field -> None, anything else -> Some(trimmed)
fn opt_field(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

fn parse_id(s: &str, field: &str, file: &str, line_no: usize) -> Result<u32> {
    s.trim().parse().map_err(|e| SnapshotError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid {}: {}", field, e),
    })
}

fn parse_date(s: &str, field: &str, file: &str, line_no: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| SnapshotError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid {}: {}", field, e),
    })
}

fn parse_opt_date(s: &str, field: &str, file: &str, line_no: usize) -> Result<Option<NaiveDate>> {
    match opt_field(s) {
        Some(value) => parse_date(value, field, file, line_no).map(Some),
        None => Ok(None),
    }
}

/// Parse the users.dat file
///
/// Format: id::fullName::dateOfBirth::minimumQualification
pub fn parse_users(path: &Path) -> Result<Vec<User>> {
    let file = "users.dat";
    let content = fs::read_to_string(path)?;
    let mut users = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue; // Skip empty lines
        }

        let fields = split_fields(line, file, line_no, 4)?;

        users.push(User {
            id: parse_id(fields[0], "userId", file, line_no)?,
            full_name: fields[1].trim().to_string(),
            date_of_birth: parse_opt_date(fields[2], "dateOfBirth", file, line_no)?,
            minimum_qualification: opt_field(fields[3]).map(str::to_string),
        });
    }

    Ok(users)
}

/// Parse the vacancies.dat file
///
/// Format:
/// id::topic::qualifications::ageRange::postedDate::examDate::applicationLink::postedBy::imagePaths
pub fn parse_vacancies(path: &Path) -> Result<Vec<Vacancy>> {
    let file = "vacancies.dat";
    let content = fs::read_to_string(path)?;
    let mut vacancies = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = split_fields(line, file, line_no, 9)?;

        let posted_by = match opt_field(fields[7]) {
            Some(value) => Some(parse_id(value, "postedBy", file, line_no)?),
            None => None,
        };

        vacancies.push(Vacancy {
            id: parse_id(fields[0], "vacancyId", file, line_no)?,
            topic: fields[1].trim().to_string(),
            qualifications: opt_field(fields[2]).map(str::to_string),
            age_range: opt_field(fields[3]).map(str::to_string),
            posted_date: parse_date(fields[4], "postedDate", file, line_no)?,
            exam_date: parse_opt_date(fields[5], "examDate", file, line_no)?,
            application_link: fields[6].trim().to_string(),
            posted_by,
            image_paths: parse_image_paths(fields[8]),
        });
    }

    Ok(vacancies)
}

/// Parse the ratings.dat file
///
/// Format: userId::vacancyId::rating
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let file = "ratings.dat";
    let content = fs::read_to_string(path)?;
    let mut ratings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = split_fields(line, file, line_no, 3)?;

        ratings.push(Rating {
            user_id: parse_id(fields[0], "userId", file, line_no)?,
            vacancy_id: parse_id(fields[1], "vacancyId", file, line_no)?,
            rating: fields[2].trim().parse().map_err(|e| SnapshotError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid rating: {}", e),
            })?,
        });
    }

    Ok(ratings)
}

/// Parse pipe-separated image paths
///
/// Example: "a.png|b.png" -> vec!["a.png", "b.png"], "" -> vec![]
fn parse_image_paths(s: &str) -> Vec<String> {
    match opt_field(s) {
        Some(value) => value.split('|').map(|p| p.trim().to_string()).collect(),
        None => Vec::new(),
    }
}
