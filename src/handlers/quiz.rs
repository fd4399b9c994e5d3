// src/handlers/quiz.rs

use axum::{
    Extension, Form,
    extract::{Path, State},
    response::Response,
};
use axum_extra::extract::{CookieJar, WithRejection};
use chrono::NaiveDate;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    handlers::{
        attempt::find_quiz, chapter::find_chapter, subject::list_subjects, validation_message,
    },
    models::quiz::{Quiz, QuizForm, QuizListing},
    names,
    utils::{
        flash::{self, Flash},
        html::clean_optional,
        session::SessionContext,
    },
    views::{self, admin as admin_views, content},
};

/// Every quiz with its chapter, subject and question count, newest date first.
pub(crate) async fn list_quizzes(pool: &SqlitePool) -> Result<Vec<QuizListing>, AppError> {
    sqlx::query_as::<_, QuizListing>(
        r#"
        SELECT
            q.id,
            q.chapter_id,
            q.date,
            q.duration,
            q.remarks,
            c.name AS chapter_name,
            s.name AS subject_name,
            (SELECT COUNT(*) FROM questions qu WHERE qu.quiz_id = q.id) AS question_count
        FROM quizzes q
        JOIN chapters c ON c.id = q.chapter_id
        JOIN subjects s ON s.id = c.subject_id
        ORDER BY q.date DESC, q.id DESC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list quizzes: {:?}", e);
        AppError::from(e)
    })
}

/// Validated quiz fields, ready to be stored.
struct QuizFields {
    date: NaiveDate,
    duration: String,
    remarks: Option<String>,
}

/// `Err` carries the message for the flash.
fn quiz_fields(form: &QuizForm) -> Result<QuizFields, String> {
    form.validate().map_err(|errors| validation_message(&errors))?;
    let date = form
        .parsed_date()
        .map_err(|_| "Date must use the YYYY-MM-DD format.".to_string())?;

    Ok(QuizFields {
        date,
        duration: form.duration.clone(),
        remarks: clean_optional(form.remarks.as_deref()),
    })
}

async fn insert_quiz(pool: &SqlitePool, chapter_id: i64, fields: &QuizFields) -> Result<i64, AppError> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO quizzes (chapter_id, date, duration, remarks)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(chapter_id)
    .bind(fields.date)
    .bind(&fields.duration)
    .bind(&fields.remarks)
    .fetch_one(pool)
    .await?;

    tracing::info!(quiz_id = id, chapter_id, "Quiz created");
    Ok(id)
}

/// Quizzes of one chapter, with the form to add another.
pub async fn quizzes_page(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    WithRejection(Path(chapter_id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let chapter = find_chapter(&pool, chapter_id).await?;

    let quizzes = sqlx::query_as::<_, Quiz>(
        "SELECT id, chapter_id, date, duration, remarks FROM quizzes WHERE chapter_id = ? ORDER BY id",
    )
    .bind(chapter.id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list quizzes of chapter {}: {:?}", chapter.id, e);
        AppError::from(e)
    })?;

    Ok(views::render(
        jar,
        "Quizzes",
        Some(&session),
        content::quizzes_page(&chapter, &quizzes),
    ))
}

/// Adds a quiz to a chapter. Admin only.
pub async fn create_chapter_quiz(
    State(pool): State<SqlitePool>,
    WithRejection(Path(chapter_id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<QuizForm>, AppError>,
) -> Result<Response, AppError> {
    let chapter = match find_chapter(&pool, chapter_id).await {
        Ok(chapter) => chapter,
        Err(e) => return flash::fail(jar, e, "Could not add the quiz.", names::ADMIN_ALL_QUIZZES_URL),
    };
    let back = names::quizzes_url(chapter.id);

    let fields = match quiz_fields(&form) {
        Ok(fields) => fields,
        Err(message) => return Ok(flash::redirect(jar, Flash::danger(message), &back)),
    };

    match insert_quiz(&pool, chapter.id, &fields).await {
        Ok(_) => Ok(flash::redirect(jar, Flash::success("Quiz added successfully!"), &back)),
        Err(e) => flash::fail(jar, e, "Could not add the quiz.", &back),
    }
}

pub async fn create_quiz_page(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let subjects = list_subjects(&pool).await?;
    Ok(views::render(jar, "Create Quiz", Some(&session), admin_views::create_quiz(&subjects)))
}

/// Creates a quiz in the chosen chapter and continues on its question page.
pub async fn create_quiz(
    State(pool): State<SqlitePool>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<QuizForm>, AppError>,
) -> Result<Response, AppError> {
    let Some(chapter_id) = form.parsed_chapter_id() else {
        return Ok(flash::redirect(
            jar,
            Flash::danger("Please choose a chapter."),
            names::ADMIN_CREATE_QUIZ_URL,
        ));
    };

    let chapter = match find_chapter(&pool, chapter_id).await {
        Ok(chapter) => chapter,
        Err(AppError::NotFound(_)) => {
            return Ok(flash::redirect(
                jar,
                Flash::danger("The selected chapter does not exist."),
                names::ADMIN_CREATE_QUIZ_URL,
            ));
        }
        Err(e) => {
            return flash::fail(jar, e, "Could not create the quiz.", names::ADMIN_CREATE_QUIZ_URL);
        }
    };

    let fields = match quiz_fields(&form) {
        Ok(fields) => fields,
        Err(message) => {
            return Ok(flash::redirect(jar, Flash::danger(message), names::ADMIN_CREATE_QUIZ_URL));
        }
    };

    match insert_quiz(&pool, chapter.id, &fields).await {
        Ok(quiz_id) => Ok(flash::redirect(
            jar,
            Flash::success("Quiz created successfully! Now add questions to your quiz."),
            &names::questions_url(quiz_id),
        )),
        Err(e) => flash::fail(jar, e, "Could not create the quiz.", names::ADMIN_CREATE_QUIZ_URL),
    }
}

pub async fn edit_quiz_page(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let quiz = find_quiz(&pool, id).await?;
    Ok(views::render(jar, "Edit quiz", Some(&session), content::edit_quiz(&quiz)))
}

pub async fn update_quiz(
    State(pool): State<SqlitePool>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<QuizForm>, AppError>,
) -> Result<Response, AppError> {
    let quiz = match find_quiz(&pool, id).await {
        Ok(quiz) => quiz,
        Err(e) => return flash::fail(jar, e, "Could not update the quiz.", names::ADMIN_ALL_QUIZZES_URL),
    };

    let fields = match quiz_fields(&form) {
        Ok(fields) => fields,
        Err(message) => {
            return Ok(flash::redirect(jar, Flash::danger(message), &names::edit_quiz_url(quiz.id)));
        }
    };

    let back = names::quizzes_url(quiz.chapter_id);
    let updated = sqlx::query("UPDATE quizzes SET date = ?, duration = ?, remarks = ? WHERE id = ?")
        .bind(fields.date)
        .bind(&fields.duration)
        .bind(&fields.remarks)
        .bind(quiz.id)
        .execute(&pool)
        .await;

    match updated {
        Ok(_) => {
            tracing::info!(quiz_id = quiz.id, "Quiz updated");
            Ok(flash::redirect(jar, Flash::success("Quiz updated successfully!"), &back))
        }
        Err(e) => flash::fail(jar, e.into(), "Could not update the quiz.", &back),
    }
}

/// Deletes a quiz with its questions and scores.
pub async fn delete_quiz(
    State(pool): State<SqlitePool>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    match remove_quiz(&pool, id).await {
        Ok(quiz) => Ok(flash::redirect(
            jar,
            Flash::success("Quiz deleted."),
            &names::quizzes_url(quiz.chapter_id),
        )),
        Err(e) => flash::fail(jar, e, "Could not delete the quiz.", names::ADMIN_ALL_QUIZZES_URL),
    }
}

async fn remove_quiz(pool: &SqlitePool, id: i64) -> Result<Quiz, AppError> {
    let mut tx = pool.begin().await?;

    let quiz = sqlx::query_as::<_, Quiz>(
        "SELECT id, chapter_id, date, duration, remarks FROM quizzes WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", id)))?;

    let (questions, scores) = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM questions WHERE quiz_id = ?1),
            (SELECT COUNT(*) FROM scores WHERE quiz_id = ?1)
        "#,
    )
    .bind(quiz.id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM quizzes WHERE id = ?")
        .bind(quiz.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(quiz_id = quiz.id, questions, scores, "Quiz deleted");

    Ok(quiz)
}

pub async fn all_quizzes(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let quizzes = list_quizzes(&pool).await?;
    Ok(views::render(jar, "All Quizzes", Some(&session), admin_views::all_quizzes(&quizzes)))
}
