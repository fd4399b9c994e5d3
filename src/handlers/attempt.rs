// src/handlers/attempt.rs

use std::collections::HashMap;

use axum::{
    Extension, Form,
    extract::{Path, State},
    response::Response,
};
use axum_extra::extract::{CookieJar, WithRejection};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    handlers::auth::is_unique_violation,
    models::{question::Question, quiz::Quiz},
    names,
    services::grading::{AnswerKey, AnswerSheet, Grade, grade},
    utils::{
        flash::{self, Flash},
        session::SessionContext,
    },
    views::{self, user as user_views},
};

const ALREADY_ATTEMPTED: &str = "You have already attempted this quiz.";
const NO_QUESTIONS: &str = "This quiz does not have any questions yet.";

pub(crate) async fn find_quiz(pool: &SqlitePool, quiz_id: i64) -> Result<Quiz, AppError> {
    sqlx::query_as::<_, Quiz>(
        "SELECT id, chapter_id, date, duration, remarks FROM quizzes WHERE id = ?",
    )
    .bind(quiz_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", quiz_id)))
}

async fn has_attempted<'e, E>(executor: E, user_id: i64, quiz_id: i64) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM scores WHERE user_id = ? AND quiz_id = ?",
    )
    .bind(user_id)
    .bind(quiz_id)
    .fetch_optional(executor)
    .await?;
    Ok(found.is_some())
}

/// Shows the questions of a quiz with the countdown timer.
///
/// A quiz can be attempted once; a quiz without questions cannot be attempted at all.
pub async fn start_quiz(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    WithRejection(Path(quiz_id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let quiz = find_quiz(&pool, quiz_id).await?;

    if has_attempted(&pool, session.user_id, quiz.id).await? {
        return Ok(flash::redirect(jar, Flash::warning(ALREADY_ATTEMPTED), names::USER_DASHBOARD_URL));
    }

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
        tracing::error!("Failed to fetch questions of quiz {}: {:?}", quiz.id, e);
        AppError::from(e)
    })?;

    if questions.is_empty() {
        return Ok(flash::redirect(jar, Flash::warning(NO_QUESTIONS), names::USER_DASHBOARD_URL));
    }

    Ok(views::render(
        jar,
        "Quiz",
        Some(&session),
        user_views::quiz_page(&quiz, &questions),
    ))
}

/// Result of one submission.
#[derive(Debug, PartialEq, Eq)]
enum AttemptOutcome {
    Recorded(Grade),
    AlreadyAttempted,
    NoQuestions,
}

/// Grades the answers and stores the score in one transaction.
///
/// Returning early drops the transaction, which rolls it back.
async fn record_attempt(
    pool: &SqlitePool,
    user_id: i64,
    quiz_id: i64,
    sheet: &AnswerSheet,
) -> Result<AttemptOutcome, AppError> {
    let mut tx = pool.begin().await?;

    if has_attempted(&mut *tx, user_id, quiz_id).await? {
        return Ok(AttemptOutcome::AlreadyAttempted);
    }

    let keys = sqlx::query_as::<_, AnswerKey>(
        "SELECT id, correct_option FROM questions WHERE quiz_id = ? ORDER BY id",
    )
    .bind(quiz_id)
    .fetch_all(&mut *tx)
    .await?;

    if keys.is_empty() {
        return Ok(AttemptOutcome::NoQuestions);
    }

    let grade = grade(&keys, sheet);

    let inserted = sqlx::query(
        r#"
        INSERT INTO scores (quiz_id, user_id, score, total_questions, timestamp)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(quiz_id)
    .bind(user_id)
    .bind(grade.score)
    .bind(grade.total_questions)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await;

    match inserted {
        Ok(_) => {}
        // A concurrent submission of the same user got there first.
        Err(e) if is_unique_violation(&e) => return Ok(AttemptOutcome::AlreadyAttempted),
        Err(e) => return Err(e.into()),
    }

    tx.commit().await?;

    Ok(AttemptOutcome::Recorded(grade))
}

/// Scores a submitted quiz and records the attempt.
pub async fn submit_quiz(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<SessionContext>,
    WithRejection(Path(quiz_id), _): WithRejection<Path<i64>, AppError>,
    jar: CookieJar,
    WithRejection(Form(fields), _): WithRejection<Form<HashMap<String, String>>, AppError>,
) -> Result<Response, AppError> {
    let quiz = match find_quiz(&pool, quiz_id).await {
        Ok(quiz) => quiz,
        Err(e) => return flash::fail(jar, e, "Could not submit the quiz. Please try again.", names::USER_DASHBOARD_URL),
    };
    let sheet = AnswerSheet::from_form(&fields);

    match record_attempt(&pool, session.user_id, quiz.id, &sheet).await {
        Ok(AttemptOutcome::Recorded(grade)) => {
            tracing::info!(
                user_id = session.user_id,
                quiz_id = quiz.id,
                answered = sheet.len(),
                score = grade.score,
                total = grade.total_questions,
                "Quiz submitted"
            );
            Ok(flash::redirect(
                jar,
                Flash::success(format!(
                    "Quiz submitted! Your score: {}/{}",
                    grade.score, grade.total_questions
                )),
                names::USER_SCORES_URL,
            ))
        }
        Ok(AttemptOutcome::AlreadyAttempted) => Ok(flash::redirect(
            jar,
            Flash::warning(ALREADY_ATTEMPTED),
            names::USER_DASHBOARD_URL,
        )),
        Ok(AttemptOutcome::NoQuestions) => Ok(flash::redirect(
            jar,
            Flash::warning(NO_QUESTIONS),
            names::USER_DASHBOARD_URL,
        )),
        Err(e) => flash::fail(
            jar,
            e,
            "Could not submit the quiz. Please try again.",
            names::USER_DASHBOARD_URL,
        ),
    }
}
