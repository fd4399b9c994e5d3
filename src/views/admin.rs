use maud::{Markup, PreEscaped, html};

use crate::{
    models::{quiz::QuizListing, subject::Subject},
    names,
    services::reports::SubjectStats,
};

pub fn dashboard(subjects: &[Subject]) -> Markup {
    html! {
        h2 { "Admin Dashboard" }
        div."mb-3" {
            a."btn btn-primary me-2" href=(names::ADMIN_SUBJECTS_URL) { "Manage subjects" }
            a."btn btn-outline-primary me-2" href=(names::ADMIN_CREATE_QUIZ_URL) { "Create quiz" }
            a."btn btn-outline-secondary" href=(names::ADMIN_SUMMARY_URL) { "Summary" }
        }
        @if subjects.is_empty() {
            p."text-muted" { "No subjects yet. Start by adding one." }
        } @else {
            div."row" {
                @for subject in subjects {
                    div."col-md-4 mb-3" {
                        div."card h-100" {
                            div."card-body" {
                                h5."card-title" { (subject.name) }
                                p."card-text" { (PreEscaped(subject.description.as_deref().unwrap_or_default())) }
                                a."card-link" href=(names::chapters_url(subject.id)) { "Chapters" }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The chapter select is filled from `/api/chapters/{subject_id}` by `app.js`.
pub fn create_quiz(subjects: &[Subject]) -> Markup {
    html! {
        h2 { "Create Quiz" }
        form method="post" action=(names::ADMIN_CREATE_QUIZ_URL) {
            div."mb-3" {
                label."form-label" for="subject_id" { "Subject" }
                select."form-select" id="subject_id" data-chapters-target="chapter_id" required {
                    option value="" { "Choose a subject" }
                    @for subject in subjects {
                        option value=(subject.id) data-chapters-url=(names::chapters_api_url(subject.id)) {
                            (subject.name)
                        }
                    }
                }
            }
            div."mb-3" {
                label."form-label" for="chapter_id" { "Chapter" }
                select."form-select" id="chapter_id" name="chapter_id" required {
                    option value="" { "Choose a subject first" }
                }
            }
            (super::content::quiz_fields(None))
            button."btn btn-primary" type="submit" { "Create quiz" }
        }
    }
}

pub fn all_quizzes(quizzes: &[QuizListing]) -> Markup {
    html! {
        h2 { "All Quizzes" }
        @if quizzes.is_empty() {
            p."text-muted" { "No quizzes yet." }
        } @else {
            table."table table-striped" {
                thead { tr {
                    th { "Quiz" }
                    th { "Subject" }
                    th { "Chapter" }
                    th { "Date" }
                    th { "Duration" }
                    th { "Questions" }
                    th { "Remarks" }
                } }
                tbody {
                    @for quiz in quizzes {
                        tr {
                            td { a href=(names::questions_url(quiz.id)) { "#" (quiz.id) } }
                            td { (quiz.subject_name) }
                            td { a href=(names::quizzes_url(quiz.chapter_id)) { (quiz.chapter_name) } }
                            td { (quiz.date.format("%Y-%m-%d").to_string()) }
                            td { (quiz.duration) }
                            td { (quiz.question_count) }
                            td { (PreEscaped(quiz.remarks.as_deref().unwrap_or_default())) }
                        }
                    }
                }
            }
        }
    }
}

pub fn summary(stats: &[SubjectStats]) -> Markup {
    html! {
        h2 { "Summary" }
        @if stats.is_empty() {
            p."text-muted" { "No subjects yet." }
        } @else {
            @let labels: Vec<String> = stats.iter().map(|s| s.subject_name.clone()).collect();
            div."row" {
                div."col-md-6" {
                    h5 { "Top score by subject" }
                    (super::chart("bar", "Top score %", &labels, &stats.iter().map(|s| s.top_score).collect::<Vec<_>>()))
                }
                div."col-md-6" {
                    h5 { "Attempts by subject" }
                    (super::chart("bar", "Attempts", &labels, &stats.iter().map(|s| s.attempts).collect::<Vec<_>>()))
                }
            }
            table."table table-striped" {
                thead { tr { th { "Subject" } th { "Top score %" } th { "Attempts" } } }
                tbody {
                    @for s in stats {
                        tr {
                            td { (s.subject_name) }
                            td { (format!("{:.1}", s.top_score)) }
                            td { (s.attempts) }
                        }
                    }
                }
            }
        }
    }
}
