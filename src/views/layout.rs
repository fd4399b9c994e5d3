use maud::{DOCTYPE, Markup, html};

use crate::{
    names,
    utils::{
        flash::Flash,
        session::{Role, SessionContext},
    },
};

fn css() -> Markup {
    html! {
        link rel="stylesheet"
            href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
    }
}

fn js() -> Markup {
    html! {
        script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js" defer {}
        script src="/static/js/app.js" defer {}
    }
}

fn nav_links(session: Option<&SessionContext>) -> Markup {
    html! {
        @match session.map(|s| s.role) {
            Some(Role::Admin) => {
                li."nav-item" { a."nav-link" href=(names::ADMIN_DASHBOARD_URL) { "Dashboard" } }
                li."nav-item" { a."nav-link" href=(names::ADMIN_SUBJECTS_URL) { "Subjects" } }
                li."nav-item" { a."nav-link" href=(names::ADMIN_CREATE_QUIZ_URL) { "Create Quiz" } }
                li."nav-item" { a."nav-link" href=(names::ADMIN_ALL_QUIZZES_URL) { "All Quizzes" } }
                li."nav-item" { a."nav-link" href=(names::ADMIN_SUMMARY_URL) { "Summary" } }
                li."nav-item" { a."nav-link" href=(names::LOGOUT_URL) { "Logout" } }
            },
            Some(Role::User) => {
                li."nav-item" { a."nav-link" href=(names::USER_DASHBOARD_URL) { "Dashboard" } }
                li."nav-item" { a."nav-link" href=(names::USER_SCORES_URL) { "Scores" } }
                li."nav-item" { a."nav-link" href=(names::USER_SUMMARY_URL) { "Summary" } }
                li."nav-item" { a."nav-link" href=(names::LOGOUT_URL) { "Logout" } }
            },
            None => {
                li."nav-item" { a."nav-link" href=(names::LOGIN_URL) { "Login" } }
                li."nav-item" { a."nav-link" href=(names::REGISTER_URL) { "Register" } }
            }
        }
    }
}

fn header(session: Option<&SessionContext>) -> Markup {
    html! {
        nav."navbar navbar-expand navbar-dark bg-primary mb-4" {
            div."container" {
                a."navbar-brand" href=(names::HOME_URL) { strong { "Quiz Master" } }
                ul."navbar-nav ms-auto" { (nav_links(session)) }
            }
        }
    }
}

fn flash_alert(flash: Option<&Flash>) -> Markup {
    html! {
        @if let Some(flash) = flash {
            div class=(format!("alert alert-{}", flash.level.as_str())) role="alert" {
                (flash.message)
            }
        }
    }
}

pub fn page(
    title: &str,
    session: Option<&SessionContext>,
    flash: Option<&Flash>,
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                (css())
                (js())
                title { (title) " - Quiz Master" }
            }
            body {
                (header(session))
                main."container" {
                    (flash_alert(flash))
                    (body)
                }
            }
        }
    }
}
