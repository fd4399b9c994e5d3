// src/handlers/mod.rs

pub mod admin;
pub mod api;
pub mod attempt;
pub mod auth;
pub mod chapter;
pub mod home;
pub mod question;
pub mod quiz;
pub mod subject;
pub mod user;

use validator::ValidationErrors;

/// First validation message of a rejected form, for a flash message.
pub(crate) fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {field}."),
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid form data.".to_string())
}
