// tests/auth_tests.rs

mod common;

use common::{ADMIN_CODE, location, spawn_app};

#[tokio::test]
async fn unknown_path_is_404() {
    let app = spawn_app().await;
    let client = app.client();

    let response = app.get(&client, "/random_path_that_does_not_exist").await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn home_page_is_public() {
    let app = spawn_app().await;
    let client = app.client();

    let response = app.get(&client, "/").await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("Quiz Master"));
}

#[tokio::test]
async fn register_then_login_as_user() {
    let app = spawn_app().await;
    let (client, email) = app.user_client().await;

    let response = app.get(&client, "/user/dashboard").await;
    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Welcome! You can now take quizzes."));
    assert!(body.contains("Test User"));

    let (qualification, is_admin): (String, bool) =
        sqlx::query_as::<_, (String, bool)>("SELECT qualification, is_admin FROM users WHERE email = ?")
            .bind(&email)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(qualification, "Not specified");
    assert!(!is_admin);
}

#[tokio::test]
async fn admin_registration_with_wrong_code_creates_no_user() {
    let app = spawn_app().await;
    let client = app.client();

    let response = app
        .post_form(
            &client,
            "/register",
            &[
                ("email", "mallory@quizmaster.test"),
                ("password", "password123"),
                ("full_name", "Mallory"),
                ("role", "admin"),
                ("admin_code", "wrong"),
            ],
        )
        .await;

    assert_eq!(location(&response), "/register");

    let users: i64 = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind("mallory@quizmaster.test")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(users, 0);

    let body = app.get(&client, "/register").await.text().await.unwrap();
    assert!(body.contains("Invalid admin code"));
}

#[tokio::test]
async fn admin_registration_with_code_lands_on_admin_dashboard() {
    let app = spawn_app().await;
    let client = app.client();

    let response = app
        .post_form(
            &client,
            "/register",
            &[
                ("email", "Coach@QuizMaster.test"),
                ("password", "password123"),
                ("full_name", "Coach"),
                ("role", "admin"),
                ("admin_code", ADMIN_CODE),
                ("dob", "1990-05-17"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/login");

    // Emails are matched case-insensitively.
    let response = app.login(&client, "coach@quizmaster.test", "password123").await;
    assert_eq!(location(&response), "/admin/dashboard");

    let response = app.get(&client, "/admin/dashboard").await;
    assert_eq!(response.status().as_u16(), 200);
    assert!(response
        .text()
        .await
        .unwrap()
        .contains("Welcome Admin! You can now create and manage quizzes."));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = spawn_app().await;
    let (_, email) = app.user_client().await;
    let client = app.client();

    let response = app
        .post_form(
            &client,
            "/register",
            &[
                ("email", email.as_str()),
                ("password", "password123"),
                ("full_name", "Someone Else"),
                ("role", "user"),
            ],
        )
        .await;

    assert_eq!(location(&response), "/register");
    let body = app.get(&client, "/register").await.text().await.unwrap();
    assert!(body.contains("Email already registered"));
}

#[tokio::test]
async fn register_fails_validation() {
    let app = spawn_app().await;
    let client = app.client();

    let response = app
        .post_form(
            &client,
            "/register",
            &[
                ("email", "not-an-email"),
                ("password", "password123"),
                ("full_name", "Someone"),
                ("role", "user"),
            ],
        )
        .await;

    assert_eq!(location(&response), "/register");
    assert_eq!(app.count("users").await, 1);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let app = spawn_app().await;
    let client = app.client();

    let response = app.login(&client, common::ADMIN_EMAIL, "not-the-password").await;

    assert_eq!(location(&response), "/login");
    let body = app.get(&client, "/login").await.text().await.unwrap();
    assert!(body.contains("Invalid email or password"));
}

#[tokio::test]
async fn guards_redirect_other_roles_to_login() {
    let app = spawn_app().await;
    let anonymous = app.client();
    let admin = app.admin_client().await;
    let (user, _) = app.user_client().await;

    let response = app.get(&anonymous, "/user/dashboard").await;
    assert_eq!(location(&response), "/login");

    let response = app.get(&anonymous, "/admin/dashboard").await;
    assert_eq!(location(&response), "/login");

    let response = app.get(&admin, "/user/scores").await;
    assert_eq!(location(&response), "/login");

    let response = app.get(&user, "/admin/subjects").await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = spawn_app().await;
    let (client, _) = app.user_client().await;

    let response = app.get(&client, "/logout").await;
    assert_eq!(location(&response), "/");

    let response = app.get(&client, "/user/dashboard").await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn tampered_session_cookie_is_ignored() {
    let app = spawn_app().await;
    let client = app.client();

    let response = client
        .get(app.url("/user/dashboard"))
        .header(reqwest::header::COOKIE, "quiz_master_session=not.a.token")
        .send()
        .await
        .unwrap();

    assert_eq!(location(&response), "/login");
}
