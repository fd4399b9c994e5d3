use axum::http::StatusCode;
use maud::{Markup, html};

use crate::names;

/// Standalone error page; rendered without session or flash context.
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let title = format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or("Error"));
    super::layout::page(
        &title,
        None,
        None,
        html! {
            div."text-center py-5" {
                h1."display-5" { (title) }
                p."lead" { (message) }
                a."btn btn-primary" href=(names::HOME_URL) { "Back to home" }
            }
        },
    )
}
