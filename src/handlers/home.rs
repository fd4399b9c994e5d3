// src/handlers/home.rs

use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::{
    utils::session::CurrentSession,
    views::{self, home as home_views},
};

/// Landing page. Logged-in callers get a link to their dashboard.
pub async fn index(CurrentSession(session): CurrentSession, jar: CookieJar) -> Response {
    views::render(jar, "Quiz Master", session.as_ref(), home_views::index(session.as_ref()))
}
