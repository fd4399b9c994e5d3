// src/handlers/admin.rs

use axum::{Extension, extract::State, response::Response};
use axum_extra::extract::CookieJar;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    handlers::subject::list_subjects,
    services::reports::{SubjectAttemptRow, summarize_subjects},
    utils::session::SessionContext,
    views::{self, admin as admin_views},
};

/// Admin landing page listing the subjects.
pub async fn dashboard(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let subjects = list_subjects(&pool).await?;
    Ok(views::render(jar, "Admin Dashboard", Some(&session), admin_views::dashboard(&subjects)))
}

/// Top percentage and attempt count per subject.
///
/// Subjects without attempts are listed with zeros.
pub async fn summary(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let rows = sqlx::query_as::<_, SubjectAttemptRow>(
        r#"
        SELECT
            sub.id AS subject_id,
            sub.name AS subject_name,
            s.score,
            s.total_questions
        FROM subjects sub
        LEFT JOIN chapters c ON c.subject_id = sub.id
        LEFT JOIN quizzes q ON q.chapter_id = c.id
        LEFT JOIN scores s ON s.quiz_id = q.id
        ORDER BY sub.id, s.id
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch admin summary: {:?}", e);
        AppError::from(e)
    })?;

    let stats = summarize_subjects(&rows);

    Ok(views::render(jar, "Summary", Some(&session), admin_views::summary(&stats)))
}
