// src/handlers/api.rs

use axum::{
    Json,
    extract::{Path, State},
};
use sqlx::SqlitePool;

use crate::{models::chapter::ChapterOption, utils::session::CurrentSession};

/// Chapters of a subject for the create-quiz page.
///
/// Always answers 200: anyone but an admin, a non-numeric id and any failure get an
/// empty list.
pub async fn list_chapters(
    State(pool): State<SqlitePool>,
    CurrentSession(session): CurrentSession,
    Path(raw_subject_id): Path<String>,
) -> Json<Vec<ChapterOption>> {
    if !session.is_some_and(|s| s.role.is_admin()) {
        return Json(Vec::new());
    }
    let Ok(subject_id) = raw_subject_id.parse::<i64>() else {
        return Json(Vec::new());
    };

    let chapters = sqlx::query_as::<_, ChapterOption>(
        "SELECT id, name FROM chapters WHERE subject_id = ? ORDER BY id",
    )
    .bind(subject_id)
    .fetch_all(&pool)
    .await
    .unwrap_or_else(|e| {
        tracing::error!("Failed to fetch chapters for subject {}: {:?}", subject_id, e);
        Vec::new()
    });

    Json(chapters)
}
