// src/models/chapter.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'chapters' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Chapter {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub subject_id: i64,
}

/// Entry of the `/api/chapters/{subject_id}` response.
#[derive(Debug, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct ChapterOption {
    pub id: i64,
    pub name: String,
}
