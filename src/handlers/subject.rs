// src/handlers/subject.rs

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
    handlers::validation_message,
    models::subject::{NamedForm, Subject},
    names,
    utils::{
        flash::{self, Flash},
        html::clean_optional,
        session::SessionContext,
    },
    views::{self, content},
};

pub(crate) async fn find_subject(pool: &SqlitePool, id: i64) -> Result<Subject, AppError> {
    sqlx::query_as::<_, Subject>("SELECT id, name, description FROM subjects WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Subject {} not found", id)))
}

pub(crate) async fn list_subjects(pool: &SqlitePool) -> Result<Vec<Subject>, AppError> {
    sqlx::query_as::<_, Subject>("SELECT id, name, description FROM subjects ORDER BY id")
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list subjects: {:?}", e);
            AppError::from(e)
        })
}

pub async fn subjects_page(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let subjects = list_subjects(&pool).await?;
    Ok(views::render(jar, "Subjects", Some(&session), content::subjects_page(&subjects)))
}

/// Creates a subject. Admin only.
pub async fn create_subject(
    State(pool): State<SqlitePool>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<NamedForm>, AppError>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(flash::redirect(jar, Flash::danger(validation_message(&errors)), names::ADMIN_SUBJECTS_URL));
    }

    let inserted = sqlx::query_scalar::<_, i64>(
        "INSERT INTO subjects (name, description) VALUES (?, ?) RETURNING id",
    )
    .bind(form.name.trim())
    .bind(clean_optional(form.description.as_deref()))
    .fetch_one(&pool)
    .await;

    match inserted {
        Ok(id) => {
            tracing::info!(subject_id = id, "Subject created");
            Ok(flash::redirect(jar, Flash::success("Subject added successfully!"), names::ADMIN_SUBJECTS_URL))
        }
        Err(e) => flash::fail(jar, e.into(), "Could not add the subject.", names::ADMIN_SUBJECTS_URL),
    }
}

pub async fn edit_subject_page(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let subject = find_subject(&pool, id).await?;
    Ok(views::render(jar, "Edit subject", Some(&session), content::edit_subject(&subject)))
}

/// Updates name and description of a subject. Admin only.
pub async fn update_subject(
    State(pool): State<SqlitePool>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<NamedForm>, AppError>,
) -> Result<Response, AppError> {
    let subject = match find_subject(&pool, id).await {
        Ok(subject) => subject,
        Err(e) => return flash::fail(jar, e, "Could not update the subject.", names::ADMIN_SUBJECTS_URL),
    };

    if let Err(errors) = form.validate() {
        return Ok(flash::redirect(
            jar,
            Flash::danger(validation_message(&errors)),
            &names::edit_subject_url(subject.id),
        ));
    }

    let updated = sqlx::query("UPDATE subjects SET name = ?, description = ? WHERE id = ?")
        .bind(form.name.trim())
        .bind(clean_optional(form.description.as_deref()))
        .bind(subject.id)
        .execute(&pool)
        .await;

    match updated {
        Ok(_) => {
            tracing::info!(subject_id = subject.id, "Subject updated");
            Ok(flash::redirect(jar, Flash::success("Subject updated successfully!"), names::ADMIN_SUBJECTS_URL))
        }
        Err(e) => flash::fail(jar, e.into(), "Could not update the subject.", names::ADMIN_SUBJECTS_URL),
    }
}

/// Deletes a subject together with its chapters, quizzes, questions and scores.
///
/// The cascade is done by the foreign keys; the transaction makes it all-or-nothing.
pub async fn delete_subject(
    State(pool): State<SqlitePool>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    match remove_subject(&pool, id).await {
        Ok(name) => Ok(flash::redirect(
            jar,
            Flash::success(format!("Subject '{}' and all its content deleted.", name)),
            names::ADMIN_SUBJECTS_URL,
        )),
        Err(e) => flash::fail(jar, e, "Could not delete the subject.", names::ADMIN_SUBJECTS_URL),
    }
}

async fn remove_subject(pool: &SqlitePool, id: i64) -> Result<String, AppError> {
    let mut tx = pool.begin().await?;

    let subject =
        sqlx::query_as::<_, Subject>("SELECT id, name, description FROM subjects WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Subject {} not found", id)))?;

    let (chapters, quizzes, questions, scores) = sqlx::query_as::<_, (i64, i64, i64, i64)>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM chapters WHERE subject_id = ?1),
            (SELECT COUNT(*) FROM quizzes q
                JOIN chapters c ON c.id = q.chapter_id
                WHERE c.subject_id = ?1),
            (SELECT COUNT(*) FROM questions qu
                JOIN quizzes q ON q.id = qu.quiz_id
                JOIN chapters c ON c.id = q.chapter_id
                WHERE c.subject_id = ?1),
            (SELECT COUNT(*) FROM scores s
                JOIN quizzes q ON q.id = s.quiz_id
                JOIN chapters c ON c.id = q.chapter_id
                WHERE c.subject_id = ?1)
        "#,
    )
    .bind(subject.id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM subjects WHERE id = ?")
        .bind(subject.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        subject_id = subject.id,
        chapters,
        quizzes,
        questions,
        scores,
        "Subject deleted"
    );

    Ok(subject.name)
}
