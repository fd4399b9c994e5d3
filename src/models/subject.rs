// src/models/subject.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'subjects' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Create/edit form shared by subjects and chapters.
#[derive(Debug, Deserialize, Validate)]
pub struct NamedForm {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name length must be between 1 and 100 characters."
    ))]
    pub name: String,
    #[validate(length(max = 2000, message = "Description is too long."))]
    pub description: Option<String>,
}
