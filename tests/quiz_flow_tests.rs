// tests/quiz_flow_tests.rs

mod common;

use common::{location, seed_quiz, seed_score, spawn_app};
use quiz_master::models::score::Score;

async fn last_id(pool: &sqlx::SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT MAX(id) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn math_algebra_scenario_scores_one_of_two() {
    let app = spawn_app().await;
    let admin = app.admin_client().await;

    // Admin builds Math -> Algebra -> quiz with two questions.
    let response = app
        .post_form(&admin, "/admin/subjects", &[("name", "Math"), ("description", "Numbers")])
        .await;
    assert_eq!(location(&response), "/admin/subjects");
    let subject_id = last_id(&app.pool, "subjects").await;

    let response = app
        .post_form(
            &admin,
            &format!("/admin/chapters/{}", subject_id),
            &[("name", "Algebra"), ("description", "")],
        )
        .await;
    assert_eq!(location(&response), format!("/admin/chapters/{}", subject_id));
    let chapter_id = last_id(&app.pool, "chapters").await;

    let chapter = chapter_id.to_string();
    let response = app
        .post_form(
            &admin,
            "/admin/create-quiz",
            &[
                ("chapter_id", chapter.as_str()),
                ("date", "2025-03-01"),
                ("duration", "00:30"),
                ("remarks", "Warm-up"),
            ],
        )
        .await;
    let quiz_id = last_id(&app.pool, "quizzes").await;
    assert_eq!(location(&response), format!("/admin/questions/{}", quiz_id));

    for correct in ["1", "3"] {
        let response = app
            .post_form(
                &admin,
                &format!("/admin/questions/{}", quiz_id),
                &[
                    ("question_text", "Pick one"),
                    ("option1", "A"),
                    ("option2", "B"),
                    ("option3", "C"),
                    ("option4", "D"),
                    ("correct_option", correct),
                ],
            )
            .await;
        assert_eq!(location(&response), format!("/admin/questions/{}", quiz_id));
    }
    let question_ids: Vec<i64> =
        sqlx::query_scalar::<_, i64>("SELECT id FROM questions WHERE quiz_id = ? ORDER BY id")
            .bind(quiz_id)
            .fetch_all(&app.pool)
            .await
            .unwrap();
    assert_eq!(question_ids.len(), 2);

    // User takes the quiz.
    let (user, _) = app.user_client().await;

    let response = app.get(&user, &format!("/user/quiz/{}", quiz_id)).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains(&format!("question_{}", question_ids[0])));
    assert!(body.contains("quiz-timer"));

    let q1 = format!("question_{}", question_ids[0]);
    let q2 = format!("question_{}", question_ids[1]);
    let response = app
        .post_form(
            &user,
            &format!("/user/submit_quiz/{}", quiz_id),
            &[(q1.as_str(), "1"), (q2.as_str(), "2")],
        )
        .await;
    assert_eq!(location(&response), "/user/scores");

    let (score, total): (i64, i64) =
        sqlx::query_as::<_, (i64, i64)>("SELECT score, total_questions FROM scores WHERE quiz_id = ?")
            .bind(quiz_id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!((score, total), (1, 2));

    let body = app.get(&user, "/user/scores").await.text().await.unwrap();
    assert!(body.contains("Quiz submitted! Your score: 1/2"));
    assert!(body.contains("1/2"));
    assert!(body.contains("Algebra"));
}

#[tokio::test]
async fn second_submission_keeps_a_single_score() {
    let app = spawn_app().await;
    let content = seed_quiz(&app.pool, "Physics", &[2]).await;
    let (user, _) = app.user_client().await;

    let field = format!("question_{}", content.question_ids[0]);
    let path = format!("/user/submit_quiz/{}", content.quiz_id);

    let response = app.post_form(&user, &path, &[(field.as_str(), "2")]).await;
    assert_eq!(location(&response), "/user/scores");

    let response = app.post_form(&user, &path, &[(field.as_str(), "1")]).await;
    assert_eq!(location(&response), "/user/dashboard");
    let body = app.get(&user, "/user/dashboard").await.text().await.unwrap();
    assert!(body.contains("You have already attempted this quiz."));

    let scores = sqlx::query_as::<_, Score>(
        "SELECT id, quiz_id, user_id, score, total_questions, timestamp FROM scores",
    )
    .fetch_all(&app.pool)
    .await
    .unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].quiz_id, content.quiz_id);
    assert_eq!((scores[0].score, scores[0].total_questions), (1, 1));

    // Reopening the quiz is refused too.
    let response = app.get(&user, &format!("/user/quiz/{}", content.quiz_id)).await;
    assert_eq!(location(&response), "/user/dashboard");
}

#[tokio::test]
async fn unanswered_and_invalid_answers_count_as_wrong() {
    let app = spawn_app().await;
    let content = seed_quiz(&app.pool, "History", &[1, 2, 3]).await;
    let (user, _) = app.user_client().await;

    let first = format!("question_{}", content.question_ids[0]);
    let second = format!("question_{}", content.question_ids[1]);
    let response = app
        .post_form(
            &user,
            &format!("/user/submit_quiz/{}", content.quiz_id),
            &[(first.as_str(), "1"), (second.as_str(), "9")],
        )
        .await;
    assert_eq!(location(&response), "/user/scores");

    let (score, total): (i64, i64) =
        sqlx::query_as::<_, (i64, i64)>("SELECT score, total_questions FROM scores")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!((score, total), (1, 3));
}

#[tokio::test]
async fn quiz_without_questions_cannot_be_attempted() {
    let app = spawn_app().await;
    let content = seed_quiz(&app.pool, "Chemistry", &[]).await;
    let (user, _) = app.user_client().await;

    let response = app.get(&user, &format!("/user/quiz/{}", content.quiz_id)).await;
    assert_eq!(location(&response), "/user/dashboard");

    let response = app
        .post_form(&user, &format!("/user/submit_quiz/{}", content.quiz_id), &[])
        .await;
    assert_eq!(location(&response), "/user/dashboard");

    let body = app.get(&user, "/user/dashboard").await.text().await.unwrap();
    assert!(body.contains("This quiz does not have any questions yet."));
    assert_eq!(app.count("scores").await, 0);
}

#[tokio::test]
async fn missing_quiz_is_404() {
    let app = spawn_app().await;
    let (user, _) = app.user_client().await;

    let response = app.get(&user, "/user/quiz/9999").await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app.post_form(&user, "/user/submit_quiz/9999", &[]).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn non_numeric_quiz_id_is_404() {
    let app = spawn_app().await;
    let (user, _) = app.user_client().await;

    let response = app.get(&user, "/user/quiz/abc").await;
    assert_eq!(response.status().as_u16(), 404);
    let body = response.text().await.unwrap();
    assert!(!body.contains("Cannot parse"));

    let response = app
        .post_form(&user, "/user/submit_quiz/abc", &[("answer_1", "1")])
        .await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(app.count("scores").await, 0);
}

#[tokio::test]
async fn user_summary_averages_by_subject() {
    let app = spawn_app().await;
    let first = seed_quiz(&app.pool, "Biology", &[1, 1, 1, 1, 1]).await;
    let second = seed_quiz(&app.pool, "Biology", &[1, 1, 1, 1, 1]).await;
    let (user, email) = app.user_client().await;

    seed_score(&app.pool, &email, first.quiz_id, 4, 5).await;
    seed_score(&app.pool, &email, second.quiz_id, 3, 5).await;

    let response = app.get(&user, "/user/summary").await;
    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Biology"));
    assert!(body.contains("70.0"));
}

#[tokio::test]
async fn dashboard_marks_attempted_quizzes() {
    let app = spawn_app().await;
    let content = seed_quiz(&app.pool, "Geography", &[4]).await;
    let (user, email) = app.user_client().await;

    let body = app.get(&user, "/user/dashboard").await.text().await.unwrap();
    assert!(body.contains(&format!("/user/quiz/{}", content.quiz_id)));

    seed_score(&app.pool, &email, content.quiz_id, 1, 1).await;

    let body = app.get(&user, "/user/dashboard").await.text().await.unwrap();
    assert!(body.contains("Attempted"));
    assert!(!body.contains(&format!("/user/quiz/{}", content.quiz_id)));
}
