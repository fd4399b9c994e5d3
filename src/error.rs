// src/error.rs

use axum::{
    extract::rejection::{FormRejection, PathRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::fmt;

use crate::{names, views};

/// Global Application Error Enum.
/// Business-rule violations never reach this type; they are answered with a flash
/// message by the handler that detected them.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // No valid session: redirect to the login page
    AuthError(String),

    // 404 Not Found
    NotFound(String),

    // 400 Bad Request: a body that could not be decoded at all
    BadRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Renders the error as an HTML page. Internal details are logged, never shown.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again later.".to_string(),
                )
            }
            AppError::AuthError(msg) => {
                tracing::debug!("Redirecting to login: {}", msg);
                return Redirect::to(names::LOGIN_URL).into_response();
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => {
                tracing::debug!("Rejected request body: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    "The submitted form could not be read. Please check the values and try again."
                        .to_string(),
                )
            }
        };

        (status, Html(views::error::error_page(status, &message).into_string())).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::AuthError(err.to_string())
    }
}

/// Undecodable form bodies get the generic 400 page instead of the extractor's text.
impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// A path id that is not a number cannot name an existing row.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path: {}", rejection.body_text());
        AppError::NotFound("Page not found".to_string())
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}
