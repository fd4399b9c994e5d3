// tests/common/mod.rs

#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use quiz_master::{config::Config, db, routes, state::AppState};
use reqwest::{Client, Response, redirect::Policy};
use sqlx::SqlitePool;

pub const ADMIN_EMAIL: &str = "admin@quizmaster.test";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const ADMIN_CODE: &str = "let-me-in";

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Fresh client with its own cookie jar; redirects are not followed.
    pub fn client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to build client")
    }

    pub async fn post_form(&self, client: &Client, path: &str, form: &[(&str, &str)]) -> Response {
        client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, client: &Client, path: &str) -> Response {
        client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, client: &Client, email: &str, password: &str) -> Response {
        self.post_form(client, "/login", &[("email", email), ("password", password)])
            .await
    }

    /// Client logged in as the seeded admin.
    pub async fn admin_client(&self) -> Client {
        let client = self.client();
        let response = self.login(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        assert_eq!(location(&response), "/admin/dashboard");
        client
    }

    /// Registers a regular user with a unique email and returns a logged-in client.
    pub async fn user_client(&self) -> (Client, String) {
        let client = self.client();
        let email = format!("user_{}@quizmaster.test", &uuid::Uuid::new_v4().to_string()[..8]);

        let response = self
            .post_form(
                &client,
                "/register",
                &[
                    ("email", email.as_str()),
                    ("password", "password123"),
                    ("full_name", "Test User"),
                    ("role", "user"),
                ],
            )
            .await;
        assert_eq!(location(&response), "/login");

        let response = self.login(&client, &email, "password123").await;
        assert_eq!(location(&response), "/user/dashboard");

        (client, email)
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count rows")
    }
}

/// Spawns the app on a random port against a fresh SQLite file.
pub async fn spawn_app() -> TestApp {
    let db_path = std::env::temp_dir().join(format!("quiz_master_test_{}.db", uuid::Uuid::new_v4()));
    let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = db::connect(&database_url)
        .await
        .expect("Failed to open test database");

    db::migrate(&pool).await.expect("Failed to migrate database");

    let config = Config {
        database_url,
        session_secret: "test_secret_for_integration_tests".to_string(),
        session_expiration: 600,
        admin_code: Some(ADMIN_CODE.to_string()),
        admin_email: Some(ADMIN_EMAIL.to_string()),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        secure_cookies: false,
        bind_address: "127.0.0.1:0".to_string(),
        rust_log: "error".to_string(),
    };

    db::seed_admin_user(&pool, &config)
        .await
        .expect("Failed to seed admin user");

    let state = AppState::new(pool.clone(), config);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { address, pool }
}

pub fn location(response: &Response) -> String {
    assert_eq!(response.status().as_u16(), 303, "expected a redirect");
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .expect("redirect without location")
        .to_str()
        .unwrap()
        .to_string()
}

/// Ids of a Subject -> Chapter -> Quiz -> Questions chain inserted directly.
pub struct Content {
    pub subject_id: i64,
    pub chapter_id: i64,
    pub quiz_id: i64,
    pub question_ids: Vec<i64>,
}

/// Inserts a quiz with one question per entry of `correct_options`.
pub async fn seed_quiz(pool: &SqlitePool, subject: &str, correct_options: &[i64]) -> Content {
    let subject_id: i64 =
        sqlx::query_scalar::<_, i64>("INSERT INTO subjects (name, description) VALUES (?, NULL) RETURNING id")
            .bind(subject)
            .fetch_one(pool)
            .await
            .unwrap();

    let chapter_id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO chapters (name, description, subject_id) VALUES ('Chapter 1', NULL, ?) RETURNING id",
    )
    .bind(subject_id)
    .fetch_one(pool)
    .await
    .unwrap();

    let quiz_id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO quizzes (chapter_id, date, duration, remarks) VALUES (?, ?, '00:30', NULL) RETURNING id",
    )
    .bind(chapter_id)
    .bind(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    .fetch_one(pool)
    .await
    .unwrap();

    let mut question_ids = Vec::new();
    for (n, correct) in correct_options.iter().enumerate() {
        let id: i64 = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO questions (quiz_id, question_text, option1, option2, option3, option4, correct_option)
            VALUES (?, ?, 'A', 'B', 'C', 'D', ?)
            RETURNING id
            "#,
        )
        .bind(quiz_id)
        .bind(format!("Question {}", n + 1))
        .bind(correct)
        .fetch_one(pool)
        .await
        .unwrap();
        question_ids.push(id);
    }

    Content {
        subject_id,
        chapter_id,
        quiz_id,
        question_ids,
    }
}

/// Records an attempt for the user with the given email.
pub async fn seed_score(pool: &SqlitePool, email: &str, quiz_id: i64, score: i64, total: i64) {
    let user_id: i64 = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap();

    sqlx::query(
        "INSERT INTO scores (quiz_id, user_id, score, total_questions, timestamp) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(quiz_id)
    .bind(user_id)
    .bind(score)
    .bind(total)
    .bind(Utc::now())
    .execute(pool)
    .await
    .unwrap();
}
