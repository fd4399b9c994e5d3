// src/models/user.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Unique login name.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub full_name: String,

    pub qualification: String,

    pub dob: NaiveDate,

    pub is_admin: bool,

    pub created_at: DateTime<Utc>,
}

/// Qualification stored when the registration form leaves it blank.
pub const DEFAULT_QUALIFICATION: &str = "Not specified";

/// Date of birth stored when the registration form leaves it blank.
pub fn default_dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default()
}

/// Login form.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, max = 100))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Registration form. `role` is `user` or `admin`; the latter needs the admin code.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Full name is required."))]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
    pub admin_code: Option<String>,
    #[validate(length(max = 100))]
    pub qualification: Option<String>,
    /// `YYYY-MM-DD`, optional.
    pub dob: Option<String>,
}

impl RegisterForm {
    pub fn wants_admin(&self) -> bool {
        self.role == "admin"
    }

    /// Parsed date of birth; blank means the default, malformed is `Err`.
    pub fn parsed_dob(&self) -> Result<NaiveDate, chrono::ParseError> {
        match self.dob.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d"),
            None => Ok(default_dob()),
        }
    }
}
