// src/models/score.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'scores' table in the database.
/// One row per (user, quiz) attempt.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Score {
    pub id: i64,
    pub quiz_id: i64,
    pub user_id: i64,
    /// Number of correct answers.
    pub score: i64,
    pub total_questions: i64,
    pub timestamp: DateTime<Utc>,
}

/// A user's score joined with the quiz's chapter and subject, for the scores page.
/// Names are optional so a broken chain still lists the attempt.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScoreListing {
    pub id: i64,
    pub quiz_id: i64,
    pub score: i64,
    pub total_questions: i64,
    pub timestamp: DateTime<Utc>,
    pub chapter_name: Option<String>,
    pub subject_name: Option<String>,
}
