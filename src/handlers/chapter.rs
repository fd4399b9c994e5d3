// src/handlers/chapter.rs

use axum::{
    Extension, Form,
    extract::{Path, State},
    response::Response,
};
use axum_extra::extract::{CookieJar, WithRejection};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    handlers::{subject::find_subject, validation_message},
    models::{chapter::Chapter, subject::NamedForm},
    names,
    utils::{
        flash::{self, Flash},
        html::clean_optional,
        session::SessionContext,
    },
    views::{self, content},
};

pub(crate) async fn find_chapter(pool: &SqlitePool, id: i64) -> Result<Chapter, AppError> {
    sqlx::query_as::<_, Chapter>(
        "SELECT id, name, description, subject_id FROM chapters WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Chapter {} not found", id)))
}

/// Chapters of one subject, with the form to add another.
pub async fn chapters_page(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    WithRejection(Path(subject_id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let subject = find_subject(&pool, subject_id).await?;

    let chapters = sqlx::query_as::<_, Chapter>(
        "SELECT id, name, description, subject_id FROM chapters WHERE subject_id = ? ORDER BY id",
    )
    .bind(subject.id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list chapters: {:?}", e);
        AppError::from(e)
    })?;

    Ok(views::render(
        jar,
        "Chapters",
        Some(&session),
        content::chapters_page(&subject, &chapters),
    ))
}

/// Adds a chapter to a subject. Admin only.
pub async fn create_chapter(
    State(pool): State<SqlitePool>,
    WithRejection(Path(subject_id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<NamedForm>, AppError>,
) -> Result<Response, AppError> {
    let subject = match find_subject(&pool, subject_id).await {
        Ok(subject) => subject,
        Err(e) => return flash::fail(jar, e, "Could not add the chapter.", names::ADMIN_SUBJECTS_URL),
    };
    let back = names::chapters_url(subject.id);

    if let Err(errors) = form.validate() {
        return Ok(flash::redirect(jar, Flash::danger(validation_message(&errors)), &back));
    }

    let inserted = sqlx::query_scalar::<_, i64>(
        "INSERT INTO chapters (name, description, subject_id) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(form.name.trim())
    .bind(clean_optional(form.description.as_deref()))
    .bind(subject.id)
    .fetch_one(&pool)
    .await;

    match inserted {
        Ok(id) => {
            tracing::info!(chapter_id = id, subject_id = subject.id, "Chapter created");
            Ok(flash::redirect(jar, Flash::success("Chapter added successfully!"), &back))
        }
        Err(e) => flash::fail(jar, e.into(), "Could not add the chapter.", &back),
    }
}

pub async fn edit_chapter_page(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let chapter = find_chapter(&pool, id).await?;
    Ok(views::render(jar, "Edit chapter", Some(&session), content::edit_chapter(&chapter)))
}

pub async fn update_chapter(
    State(pool): State<SqlitePool>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<NamedForm>, AppError>,
) -> Result<Response, AppError> {
    let chapter = match find_chapter(&pool, id).await {
        Ok(chapter) => chapter,
        Err(e) => return flash::fail(jar, e, "Could not update the chapter.", names::ADMIN_SUBJECTS_URL),
    };

    if let Err(errors) = form.validate() {
        return Ok(flash::redirect(
            jar,
            Flash::danger(validation_message(&errors)),
            &names::edit_chapter_url(chapter.id),
        ));
    }

    let back = names::chapters_url(chapter.subject_id);
    let updated = sqlx::query("UPDATE chapters SET name = ?, description = ? WHERE id = ?")
        .bind(form.name.trim())
        .bind(clean_optional(form.description.as_deref()))
        .bind(chapter.id)
        .execute(&pool)
        .await;

    match updated {
        Ok(_) => {
            tracing::info!(chapter_id = chapter.id, "Chapter updated");
            Ok(flash::redirect(jar, Flash::success("Chapter updated successfully!"), &back))
        }
        Err(e) => flash::fail(jar, e.into(), "Could not update the chapter.", &back),
    }
}

/// Deletes a chapter with its quizzes, questions and scores.
pub async fn delete_chapter(
    State(pool): State<SqlitePool>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    match remove_chapter(&pool, id).await {
        Ok(chapter) => Ok(flash::redirect(
            jar,
            Flash::success(format!("Chapter '{}' and all its content deleted.", chapter.name)),
            &names::chapters_url(chapter.subject_id),
        )),
        Err(e) => flash::fail(jar, e, "Could not delete the chapter.", names::ADMIN_SUBJECTS_URL),
    }
}

async fn remove_chapter(pool: &SqlitePool, id: i64) -> Result<Chapter, AppError> {
    let mut tx = pool.begin().await?;

    let chapter = sqlx::query_as::<_, Chapter>(
        "SELECT id, name, description, subject_id FROM chapters WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Chapter {} not found", id)))?;

    let (quizzes, questions, scores) = sqlx::query_as::<_, (i64, i64, i64)>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM quizzes WHERE chapter_id = ?1),
            (SELECT COUNT(*) FROM questions qu
                JOIN quizzes q ON q.id = qu.quiz_id
                WHERE q.chapter_id = ?1),
            (SELECT COUNT(*) FROM scores s
                JOIN quizzes q ON q.id = s.quiz_id
                WHERE q.chapter_id = ?1)
        "#,
    )
    .bind(chapter.id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM chapters WHERE id = ?")
        .bind(chapter.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(chapter_id = chapter.id, quizzes, questions, scores, "Chapter deleted");

    Ok(chapter)
}
