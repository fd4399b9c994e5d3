use std::collections::HashSet;

use maud::{Markup, PreEscaped, html};

use crate::{
    models::{
        question::Question,
        quiz::{Quiz, QuizListing},
        score::ScoreListing,
        user::User,
    },
    names,
    services::reports::UserSummary,
};

pub fn dashboard(user: &User, quizzes: &[QuizListing], attempted: &HashSet<i64>) -> Markup {
    html! {
        h2 { "Welcome, " (user.full_name) }
        p."text-muted" { "Pick a quiz to start. Every quiz can be attempted once." }

        @if quizzes.is_empty() {
            p { "No quizzes are available yet." }
        } @else {
            table."table table-striped align-middle" {
                thead { tr {
                    th { "Subject" }
                    th { "Chapter" }
                    th { "Date" }
                    th { "Duration" }
                    th { "Questions" }
                    th {}
                } }
                tbody {
                    @for quiz in quizzes {
                        tr {
                            td { (quiz.subject_name) }
                            td { (quiz.chapter_name) }
                            td { (quiz.date.format("%Y-%m-%d").to_string()) }
                            td { (quiz.duration) }
                            td { (quiz.question_count) }
                            td {
                                @if attempted.contains(&quiz.id) {
                                    span."badge bg-secondary" { "Attempted" }
                                } @else if quiz.question_count == 0 {
                                    span."badge bg-light text-dark" { "No questions yet" }
                                } @else {
                                    a."btn btn-sm btn-primary" href=(names::start_quiz_url(quiz.id)) { "Start" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn quiz_page(quiz: &Quiz, questions: &[Question]) -> Markup {
    html! {
        div."d-flex justify-content-between align-items-center mb-3" {
            h2 { "Quiz #" (quiz.id) }
            span."badge bg-warning text-dark fs-6" {
                "Time left: " span id="quiz-timer" { (quiz.duration) }
            }
        }
        @if let Some(remarks) = &quiz.remarks {
            p."text-muted" { (PreEscaped(remarks)) }
        }
        form id="quiz-form" method="post" action=(names::submit_quiz_url(quiz.id)) {
            @for (n, question) in questions.iter().enumerate() {
                @let field = names::answer_field(question.id);
                div."card mb-3" {
                    div."card-body" {
                        h5."card-title" { (n + 1) ". " (question.question_text) }
                        @for (option, text) in question.options() {
                            @let id = format!("{field}_{option}");
                            div."form-check" {
                                input."form-check-input" type="radio" name=(field) id=(id) value=(option);
                                label."form-check-label" for=(id) { (text) }
                            }
                        }
                    }
                }
            }
            button."btn btn-success" type="submit" { "Submit quiz" }
        }
    }
}

pub fn scores(scores: &[ScoreListing]) -> Markup {
    html! {
        h2 { "My Scores" }
        @if scores.is_empty() {
            p { "You have not attempted any quiz yet." }
        } @else {
            table."table table-striped" {
                thead { tr {
                    th { "Quiz" }
                    th { "Subject" }
                    th { "Chapter" }
                    th { "Score" }
                    th { "Taken" }
                } }
                tbody {
                    @for score in scores {
                        tr {
                            td { "#" (score.quiz_id) }
                            td { (score.subject_name.as_deref().unwrap_or("-")) }
                            td { (score.chapter_name.as_deref().unwrap_or("-")) }
                            td { (score.score) "/" (score.total_questions) }
                            td { (score.timestamp.format("%Y-%m-%d %H:%M").to_string()) }
                        }
                    }
                }
            }
        }
    }
}

pub fn summary(summary: &UserSummary) -> Markup {
    html! {
        h2 { "My Summary" }
        div."row" {
            div."col-md-6" {
                h4 { "Average score by subject" }
                @if summary.subject_labels.is_empty() {
                    p."text-muted" { "No data yet." }
                } @else {
                    (super::chart("bar", "Average %", &summary.subject_labels, &summary.subject_averages))
                    table."table" {
                        thead { tr { th { "Subject" } th { "Average %" } } }
                        tbody {
                            @for (label, average) in summary.subject_labels.iter().zip(&summary.subject_averages) {
                                tr { td { (label) } td { (format!("{average:.1}")) } }
                            }
                        }
                    }
                }
            }
            div."col-md-6" {
                h4 { "Attempts by month" }
                @if summary.month_labels.is_empty() {
                    p."text-muted" { "No data yet." }
                } @else {
                    (super::chart("line", "Attempts", &summary.month_labels, &summary.month_counts))
                    table."table" {
                        thead { tr { th { "Month" } th { "Attempts" } } }
                        tbody {
                            @for (label, count) in summary.month_labels.iter().zip(&summary.month_counts) {
                                tr { td { (label) } td { (count) } }
                            }
                        }
                    }
                }
            }
        }
    }
}
