// src/handlers/question.rs

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
    handlers::{attempt::find_quiz, validation_message},
    models::question::{Question, QuestionForm},
    names,
    utils::{
        flash::{self, Flash},
        session::SessionContext,
    },
    views::{self, content},
};

async fn find_question(pool: &SqlitePool, id: i64) -> Result<Question, AppError> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, quiz_id, question_text, option1, option2, option3, option4, correct_option
        FROM questions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Question {} not found", id)))
}

/// Questions of a quiz, answers highlighted, with the form to add another.
pub async fn questions_page(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    WithRejection(Path(quiz_id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let quiz = find_quiz(&pool, quiz_id).await?;

    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, quiz_id, question_text, option1, option2, option3, option4, correct_option
        FROM questions
        WHERE quiz_id = ?
        ORDER BY id
        "#,
    )
    .bind(quiz.id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list questions of quiz {}: {:?}", quiz.id, e);
        AppError::from(e)
    })?;

    Ok(views::render(
        jar,
        "Questions",
        Some(&session),
        content::questions_page(&quiz, &questions),
    ))
}

/// Adds a question to a quiz. Admin only.
pub async fn create_question(
    State(pool): State<SqlitePool>,
    WithRejection(Path(quiz_id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<QuestionForm>, AppError>,
) -> Result<Response, AppError> {
    let quiz = match find_quiz(&pool, quiz_id).await {
        Ok(quiz) => quiz,
        Err(e) => return flash::fail(jar, e, "Could not add the question.", names::ADMIN_ALL_QUIZZES_URL),
    };
    let back = names::questions_url(quiz.id);

    if let Err(errors) = form.validate() {
        return Ok(flash::redirect(jar, Flash::danger(validation_message(&errors)), &back));
    }

    let inserted = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO questions (quiz_id, question_text, option1, option2, option3, option4, correct_option)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(quiz.id)
    .bind(form.question_text.trim())
    .bind(form.option1.trim())
    .bind(form.option2.trim())
    .bind(form.option3.trim())
    .bind(form.option4.trim())
    .bind(form.correct_option)
    .fetch_one(&pool)
    .await;

    match inserted {
        Ok(id) => {
            tracing::info!(question_id = id, quiz_id = quiz.id, "Question created");
            Ok(flash::redirect(jar, Flash::success("Question added successfully!"), &back))
        }
        Err(e) => flash::fail(jar, e.into(), "Could not add the question.", &back),
    }
}

pub async fn edit_question_page(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let question = find_question(&pool, id).await?;
    Ok(views::render(jar, "Edit question", Some(&session), content::edit_question(&question)))
}

pub async fn update_question(
    State(pool): State<SqlitePool>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<QuestionForm>, AppError>,
) -> Result<Response, AppError> {
    let question = match find_question(&pool, id).await {
        Ok(question) => question,
        Err(e) => return flash::fail(jar, e, "Could not update the question.", names::ADMIN_ALL_QUIZZES_URL),
    };

    if let Err(errors) = form.validate() {
        return Ok(flash::redirect(
            jar,
            Flash::danger(validation_message(&errors)),
            &names::edit_question_url(question.id),
        ));
    }

    let back = names::questions_url(question.quiz_id);
    let updated = sqlx::query(
        r#"
        UPDATE questions
        SET question_text = ?, option1 = ?, option2 = ?, option3 = ?, option4 = ?, correct_option = ?
        WHERE id = ?
        "#,
    )
    .bind(form.question_text.trim())
    .bind(form.option1.trim())
    .bind(form.option2.trim())
    .bind(form.option3.trim())
    .bind(form.option4.trim())
    .bind(form.correct_option)
    .bind(question.id)
    .execute(&pool)
    .await;

    match updated {
        Ok(_) => {
            tracing::info!(question_id = question.id, "Question updated");
            Ok(flash::redirect(jar, Flash::success("Question updated successfully!"), &back))
        }
        Err(e) => flash::fail(jar, e.into(), "Could not update the question.", &back),
    }
}

/// Deletes a single question. Scores already recorded for its quiz are kept.
pub async fn delete_question(
    State(pool): State<SqlitePool>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let question = match find_question(&pool, id).await {
        Ok(question) => question,
        Err(e) => return flash::fail(jar, e, "Could not delete the question.", names::ADMIN_ALL_QUIZZES_URL),
    };
    let back = names::questions_url(question.quiz_id);

    let deleted = sqlx::query("DELETE FROM questions WHERE id = ?")
        .bind(question.id)
        .execute(&pool)
        .await;

    match deleted {
        Ok(_) => {
            tracing::info!(question_id = question.id, quiz_id = question.quiz_id, "Question deleted");
            Ok(flash::redirect(jar, Flash::success("Question deleted."), &back))
        }
        Err(e) => flash::fail(jar, e.into(), "Could not delete the question.", &back),
    }
}
