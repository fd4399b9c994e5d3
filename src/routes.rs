// src/routes.rs

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    error::not_found,
    handlers::{admin, api, attempt, auth, chapter, home, question, quiz, subject, user},
    state::AppState,
    utils::session::{require_admin, require_user, session_middleware},
};

/// Assembles the main application router.
///
/// * Public pages (home, login, register, logout, chapter API).
/// * User pages behind `require_user`, admin pages behind `require_admin`.
/// * Applies global middleware (session decoding, Trace) and serves `/static`.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(home::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
        // Answers [] unless the caller is an admin
        .route("/api/chapters/{subject_id}", get(api::list_chapters));

    let user_routes = Router::new()
        .route("/user/dashboard", get(user::dashboard))
        .route("/user/quiz/{quiz_id}", get(attempt::start_quiz))
        .route(
            "/user/submit_quiz/{quiz_id}",
            post(attempt::submit_quiz),
        )
        .route("/user/scores", get(user::scores))
        .route("/user/summary", get(user::summary))
        .route_layer(middleware::from_fn(require_user));

    let admin_routes = Router::new()
        .route("/admin/dashboard", get(admin::dashboard))
        .route(
            "/admin/subjects",
            get(subject::subjects_page).post(subject::create_subject),
        )
        .route(
            "/admin/subject/{id}/edit",
            get(subject::edit_subject_page).post(subject::update_subject),
        )
        .route("/admin/subject/{id}/delete", get(subject::delete_subject))
        .route(
            "/admin/chapters/{subject_id}",
            get(chapter::chapters_page).post(chapter::create_chapter),
        )
        .route(
            "/admin/chapter/{id}/edit",
            get(chapter::edit_chapter_page).post(chapter::update_chapter),
        )
        .route("/admin/chapter/{id}/delete", get(chapter::delete_chapter))
        .route(
            "/admin/quizzes/{chapter_id}",
            get(quiz::quizzes_page).post(quiz::create_chapter_quiz),
        )
        .route(
            "/admin/quiz/{id}/edit",
            get(quiz::edit_quiz_page).post(quiz::update_quiz),
        )
        .route("/admin/quiz/{id}/delete", get(quiz::delete_quiz))
        .route(
            "/admin/questions/{quiz_id}",
            get(question::questions_page).post(question::create_question),
        )
        .route(
            "/admin/question/{id}/edit",
            get(question::edit_question_page).post(question::update_question),
        )
        .route("/admin/question/{id}/delete", get(question::delete_question))
        .route(
            "/admin/create-quiz",
            get(quiz::create_quiz_page).post(quiz::create_quiz),
        )
        .route("/admin/all-quizzes", get(quiz::all_quizzes))
        .route("/admin/summary", get(admin::summary))
        .route_layer(middleware::from_fn(require_admin));

    let static_dir = ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static"));

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .nest_service("/static", static_dir)
        .fallback(not_found)
        // Global Middleware (applied from outside in)
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
