// src/models/quiz.rs

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// `HH:MM`, minutes below 60.
static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:[0-5]\d$").expect("valid duration regex"));

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub chapter_id: i64,

    /// Scheduled date of the quiz.
    pub date: NaiveDate,

    /// Time allowed, `HH:MM`.
    pub duration: String,

    pub remarks: Option<String>,
}

/// A quiz joined with its place in the content hierarchy, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizListing {
    pub id: i64,
    pub chapter_id: i64,
    pub date: NaiveDate,
    pub duration: String,
    pub remarks: Option<String>,
    pub chapter_name: String,
    pub subject_name: String,
    pub question_count: i64,
}

/// Create/edit form for quizzes. `chapter_id` is only read by the create-quiz page.
#[derive(Debug, Deserialize, Validate)]
pub struct QuizForm {
    pub chapter_id: Option<String>,
    #[validate(length(min = 1, message = "Date is required."))]
    pub date: String,
    #[validate(custom(function = validate_duration, message = "Duration must use the HH:MM format."))]
    pub duration: String,
    #[validate(length(max = 2000, message = "Remarks are too long."))]
    pub remarks: Option<String>,
}

impl QuizForm {
    pub fn parsed_date(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
    }

    pub fn parsed_chapter_id(&self) -> Option<i64> {
        self.chapter_id.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}

fn validate_duration(duration: &str) -> Result<(), validator::ValidationError> {
    if !DURATION_RE.is_match(duration) || duration == "00:00" {
        return Err(validator::ValidationError::new("invalid_duration"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(date: &str, duration: &str) -> QuizForm {
        QuizForm {
            chapter_id: None,
            date: date.to_string(),
            duration: duration.to_string(),
            remarks: None,
        }
    }

    #[test]
    fn duration_must_be_hours_and_minutes() {
        assert!(form("2025-03-01", "01:30").validate().is_ok());
        assert!(form("2025-03-01", "1:30").validate().is_err());
        assert!(form("2025-03-01", "01:75").validate().is_err());
        assert!(form("2025-03-01", "00:00").validate().is_err());
    }

    #[test]
    fn date_is_parsed_as_calendar_day() {
        assert_eq!(
            form("2025-03-01", "00:10").parsed_date().unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert!(form("03/01/2025", "00:10").parsed_date().is_err());
    }
}
