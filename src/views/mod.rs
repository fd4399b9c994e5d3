// src/views/mod.rs

pub mod admin;
pub mod auth;
pub mod content;
pub mod error;
pub mod home;
pub mod layout;
pub mod user;

use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;
use maud::{Markup, html};
use serde_json::json;

use crate::utils::{flash, session::SessionContext};

/// Wraps `body` in the page layout, consuming any pending flash message.
pub fn render(
    jar: CookieJar,
    title: &str,
    session: Option<&SessionContext>,
    body: Markup,
) -> Response {
    let (jar, flash) = flash::take(jar);
    let page = layout::page(title, session, flash.as_ref(), body);
    (jar, Html(page.into_string())).into_response()
}

/// Canvas drawn by `app.js` with Chart.js from the JSON in `data-chart`.
pub(crate) fn chart<T: serde::Serialize>(kind: &str, label: &str, labels: &[String], values: &[T]) -> Markup {
    let config = json!({
        "type": kind,
        "label": label,
        "labels": labels,
        "values": values,
    });
    html! {
        canvas."mb-3" data-chart=(config.to_string()) height="140" {}
    }
}
