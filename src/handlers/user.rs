// src/handlers/user.rs

use std::collections::HashSet;

use axum::{Extension, extract::State, response::Response};
use axum_extra::extract::CookieJar;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    handlers::quiz::list_quizzes,
    models::{score::ScoreListing, user::User},
    services::reports::{AttemptRow, summarize_user},
    utils::session::SessionContext,
    views::{self, user as user_views},
};

/// Loads the user behind a session.
///
/// A session whose user row has disappeared is treated as logged out.
pub(crate) async fn current_user(pool: &SqlitePool, user_id: i64) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password, full_name, qualification, dob, is_admin, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::AuthError(format!("User {} no longer exists", user_id)))
}

/// Lists every quiz with its subject and chapter, marking the ones already attempted.
pub async fn dashboard(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let user = current_user(&pool, session.user_id).await?;
    let quizzes = list_quizzes(&pool).await?;

    let attempted: HashSet<i64> =
        sqlx::query_scalar::<_, i64>("SELECT quiz_id FROM scores WHERE user_id = ?")
            .bind(session.user_id)
            .fetch_all(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch attempted quizzes: {:?}", e);
                AppError::from(e)
            })?
            .into_iter()
            .collect();

    Ok(views::render(
        jar,
        "Dashboard",
        Some(&session),
        user_views::dashboard(&user, &quizzes, &attempted),
    ))
}

/// The user's attempts, newest first.
pub async fn scores(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let scores = sqlx::query_as::<_, ScoreListing>(
        r#"
        SELECT
            s.id,
            s.quiz_id,
            s.score,
            s.total_questions,
            s.timestamp,
            c.name AS chapter_name,
            sub.name AS subject_name
        FROM scores s
        LEFT JOIN quizzes q ON q.id = s.quiz_id
        LEFT JOIN chapters c ON c.id = q.chapter_id
        LEFT JOIN subjects sub ON sub.id = c.subject_id
        WHERE s.user_id = ?
        ORDER BY s.timestamp DESC, s.id DESC
        "#,
    )
    .bind(session.user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch scores: {:?}", e);
        AppError::from(e)
    })?;

    Ok(views::render(jar, "My Scores", Some(&session), user_views::scores(&scores)))
}

/// Average percentage per subject and attempts per month.
pub async fn summary(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let attempts = sqlx::query_as::<_, AttemptRow>(
        r#"
        SELECT
            sub.name AS subject_name,
            s.score,
            s.total_questions,
            s.timestamp
        FROM scores s
        LEFT JOIN quizzes q ON q.id = s.quiz_id
        LEFT JOIN chapters c ON c.id = q.chapter_id
        LEFT JOIN subjects sub ON sub.id = c.subject_id
        WHERE s.user_id = ?
        ORDER BY s.timestamp ASC, s.id ASC
        "#,
    )
    .bind(session.user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch attempts for summary: {:?}", e);
        AppError::from(e)
    })?;

    let summary = summarize_user(&attempts);

    Ok(views::render(jar, "My Summary", Some(&session), user_views::summary(&summary)))
}
