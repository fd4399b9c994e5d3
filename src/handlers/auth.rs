// src/handlers/auth.rs

use axum::{
    Form,
    extract::State,
    response::Response,
};
use axum_extra::extract::{CookieJar, WithRejection};
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    handlers::validation_message,
    models::user::{DEFAULT_QUALIFICATION, LoginForm, RegisterForm, User},
    names,
    utils::{
        flash::{self, Flash},
        hash::{hash_password, verify_password},
        session::{CurrentSession, Role, clear_session_cookie, session_cookie, sign_session},
    },
    views::{self, auth as auth_views},
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Emails are compared case-insensitively.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn login_page(CurrentSession(session): CurrentSession, jar: CookieJar) -> Response {
    views::render(jar, "Login", session.as_ref(), auth_views::login_form())
}

/// Authenticates a user and starts a session.
///
/// Verifies the email and password against the database. If valid, signs a session
/// token with the user's ID and role and redirects to the matching dashboard.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<LoginForm>, AppError>,
) -> Result<Response, AppError> {
    if form.validate().is_err() {
        return Ok(flash::redirect(jar, Flash::danger(INVALID_CREDENTIALS), names::LOGIN_URL));
    }

    let user = match authenticate(&pool, &form).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!("Failed login attempt");
            return Ok(flash::redirect(jar, Flash::danger(INVALID_CREDENTIALS), names::LOGIN_URL));
        }
        Err(e) => return flash::fail(jar, e, "Login failed. Please try again.", names::LOGIN_URL),
    };

    let role = Role::from_admin_flag(user.is_admin);
    let token = match sign_session(user.id, role, &config.session_secret, config.session_expiration) {
        Ok(token) => token,
        Err(e) => return flash::fail(jar, e, "Login failed. Please try again.", names::LOGIN_URL),
    };
    let jar = jar.add(session_cookie(token, &config));

    tracing::info!(user_id = user.id, ?role, "User logged in");

    let (message, target) = match role {
        Role::Admin => (
            "Welcome Admin! You can now create and manage quizzes.",
            names::ADMIN_DASHBOARD_URL,
        ),
        Role::User => ("Welcome! You can now take quizzes.", names::USER_DASHBOARD_URL),
    };

    Ok(flash::redirect(jar, Flash::success(message), target))
}

/// `Ok(None)` for an unknown email or a wrong password.
async fn authenticate(pool: &SqlitePool, form: &LoginForm) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password, full_name, qualification, dob, is_admin, created_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(normalize_email(&form.email))
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::from(e)
    })?;

    let Some(user) = user else {
        return Ok(None);
    };

    if !verify_password(&form.password, &user.password)? {
        return Ok(None);
    }

    Ok(Some(user))
}

pub async fn register_page(CurrentSession(session): CurrentSession, jar: CookieJar) -> Response {
    views::render(jar, "Register", session.as_ref(), auth_views::register_form())
}

/// Registers a new user.
///
/// Registering as admin requires the configured admin code. The password is hashed
/// with Argon2 before it is stored.
pub async fn register(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    jar: CookieJar,
    WithRejection(Form(form), _): WithRejection<Form<RegisterForm>, AppError>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(flash::redirect(
            jar,
            Flash::danger(validation_message(&errors)),
            names::REGISTER_URL,
        ));
    }

    let Ok(dob) = form.parsed_dob() else {
        return Ok(flash::redirect(
            jar,
            Flash::danger("Date of birth must use the YYYY-MM-DD format."),
            names::REGISTER_URL,
        ));
    };

    if form.wants_admin() {
        let code_matches = match (&config.admin_code, &form.admin_code) {
            (Some(expected), Some(given)) => expected == given,
            _ => false,
        };
        if !code_matches {
            tracing::warn!("Admin registration rejected: invalid admin code");
            return Ok(flash::redirect(jar, Flash::danger("Invalid admin code"), names::REGISTER_URL));
        }
    }

    match create_user(&pool, &form, dob).await {
        Ok(Some(user_id)) => {
            tracing::info!(user_id, is_admin = form.wants_admin(), "User registered");
            Ok(flash::redirect(
                jar,
                Flash::success("Registration successful! Please login."),
                names::LOGIN_URL,
            ))
        }
        Ok(None) => Ok(flash::redirect(
            jar,
            Flash::danger("Email already registered"),
            names::REGISTER_URL,
        )),
        Err(e) => flash::fail(jar, e, "Registration failed. Please try again.", names::REGISTER_URL),
    }
}

/// Inserts the user; `Ok(None)` when the email is taken.
async fn create_user(
    pool: &SqlitePool,
    form: &RegisterForm,
    dob: NaiveDate,
) -> Result<Option<i64>, AppError> {
    let email = normalize_email(&form.email);

    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(None);
    }

    let hashed_password = hash_password(&form.password)?;
    let qualification = form
        .qualification
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .unwrap_or(DEFAULT_QUALIFICATION);

    let inserted = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (email, password, full_name, qualification, dob, is_admin, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&email)
    .bind(hashed_password)
    .bind(form.full_name.trim())
    .bind(qualification)
    .bind(dob)
    .bind(form.wants_admin())
    .bind(Utc::now())
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(id) => Ok(Some(id)),
        // Lost a race against a concurrent registration with the same email.
        Err(e) if is_unique_violation(&e) => Ok(None),
        Err(e) => {
            tracing::error!("Failed to register user: {:?}", e);
            Err(AppError::from(e))
        }
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Ends the session and returns to the home page.
pub async fn logout(CurrentSession(session): CurrentSession, jar: CookieJar) -> Response {
    if let Some(session) = session {
        tracing::info!(user_id = session.user_id, "User logged out");
    }
    let jar = jar.remove(clear_session_cookie());
    flash::redirect(jar, Flash::info("You have been logged out."), names::HOME_URL)
}
