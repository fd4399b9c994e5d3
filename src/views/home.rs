use maud::{Markup, html};

use crate::{
    names,
    utils::session::{Role, SessionContext},
};

pub fn index(session: Option<&SessionContext>) -> Markup {
    html! {
        div."p-5 mb-4 bg-light rounded-3" {
            h1."display-5 fw-bold" { "Quiz Master" }
            p."fs-5" {
                "Subjects, chapters and timed quizzes. Take a quiz, get scored instantly and follow your progress."
            }
            @match session.map(|s| s.role) {
                Some(Role::Admin) => a."btn btn-primary btn-lg" href=(names::ADMIN_DASHBOARD_URL) { "Go to admin dashboard" },
                Some(Role::User) => a."btn btn-primary btn-lg" href=(names::USER_DASHBOARD_URL) { "Go to my dashboard" },
                None => {
                    a."btn btn-primary btn-lg me-2" href=(names::LOGIN_URL) { "Login" }
                    a."btn btn-outline-secondary btn-lg" href=(names::REGISTER_URL) { "Register" }
                }
            }
        }
    }
}
