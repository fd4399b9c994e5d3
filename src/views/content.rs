//! Admin pages for the Subject -> Chapter -> Quiz -> Question hierarchy.

use maud::{Markup, PreEscaped, html};

use crate::{
    models::{chapter::Chapter, question::Question, quiz::Quiz, subject::Subject},
    names,
};

fn named_fields(name: &str, description: Option<&str>) -> Markup {
    html! {
        div."mb-3" {
            label."form-label" for="name" { "Name" }
            input."form-control" type="text" id="name" name="name" value=(name) required;
        }
        div."mb-3" {
            label."form-label" for="description" { "Description" }
            textarea."form-control" id="description" name="description" rows="3" {
                (description.unwrap_or_default())
            }
        }
    }
}

pub(crate) fn quiz_fields(quiz: Option<&Quiz>) -> Markup {
    let date = quiz.map(|q| q.date.format("%Y-%m-%d").to_string()).unwrap_or_default();
    html! {
        div."mb-3" {
            label."form-label" for="date" { "Date" }
            input."form-control" type="date" id="date" name="date" value=(date) required;
        }
        div."mb-3" {
            label."form-label" for="duration" { "Duration (HH:MM)" }
            input."form-control" type="text" id="duration" name="duration"
                pattern="[0-9]{2}:[0-5][0-9]" placeholder="00:30"
                value=(quiz.map(|q| q.duration.as_str()).unwrap_or_default()) required;
        }
        div."mb-3" {
            label."form-label" for="remarks" { "Remarks" }
            textarea."form-control" id="remarks" name="remarks" rows="2" {
                (quiz.and_then(|q| q.remarks.as_deref()).unwrap_or_default())
            }
        }
    }
}

fn question_fields(question: Option<&Question>) -> Markup {
    let text = |n: i64| -> String {
        question
            .map(|q| q.options()[(n - 1) as usize].1.to_string())
            .unwrap_or_default()
    };
    let correct = question.map(|q| q.correct_option).unwrap_or(1);
    html! {
        div."mb-3" {
            label."form-label" for="question_text" { "Question" }
            textarea."form-control" id="question_text" name="question_text" rows="2" required {
                (question.map(|q| q.question_text.as_str()).unwrap_or_default())
            }
        }
        @for n in 1..=4_i64 {
            @let field = format!("option{n}");
            div."mb-2" {
                label."form-label" for=(field) { "Option " (n) }
                input."form-control" type="text" id=(field) name=(field) value=(text(n)) required;
            }
        }
        div."mb-3" {
            label."form-label" for="correct_option" { "Correct option" }
            select."form-select" id="correct_option" name="correct_option" {
                @for n in 1..=4_i64 {
                    option value=(n) selected[n == correct] { "Option " (n) }
                }
            }
        }
    }
}

fn row_actions(edit: String, delete: String, what: &str) -> Markup {
    html! {
        a."btn btn-sm btn-outline-primary me-1" href=(edit) { "Edit" }
        a."btn btn-sm btn-outline-danger" href=(delete)
            data-confirm=(format!("Delete this {what} and everything under it?")) { "Delete" }
    }
}

pub fn subjects_page(subjects: &[Subject]) -> Markup {
    html! {
        h2 { "Subjects" }
        div."row" {
            div."col-md-7" {
                table."table table-striped" {
                    thead { tr { th { "Name" } th { "Description" } th {} } }
                    tbody {
                        @for subject in subjects {
                            tr {
                                td { a href=(names::chapters_url(subject.id)) { (subject.name) } }
                                td { (PreEscaped(subject.description.as_deref().unwrap_or_default())) }
                                td."text-end" {
                                    (row_actions(names::edit_subject_url(subject.id), names::delete_subject_url(subject.id), "subject"))
                                }
                            }
                        }
                    }
                }
            }
            div."col-md-5" {
                h4 { "Add subject" }
                form method="post" action=(names::ADMIN_SUBJECTS_URL) {
                    (named_fields("", None))
                    button."btn btn-primary" type="submit" { "Add subject" }
                }
            }
        }
    }
}

pub fn edit_subject(subject: &Subject) -> Markup {
    html! {
        h2 { "Edit subject" }
        form method="post" action=(names::edit_subject_url(subject.id)) {
            (named_fields(&subject.name, subject.description.as_deref()))
            button."btn btn-primary me-2" type="submit" { "Save" }
            a."btn btn-secondary" href=(names::ADMIN_SUBJECTS_URL) { "Cancel" }
        }
    }
}

pub fn chapters_page(subject: &Subject, chapters: &[Chapter]) -> Markup {
    html! {
        nav { a href=(names::ADMIN_SUBJECTS_URL) { "Subjects" } " / " (subject.name) }
        h2 { "Chapters of " (subject.name) }
        div."row" {
            div."col-md-7" {
                table."table table-striped" {
                    thead { tr { th { "Name" } th { "Description" } th {} } }
                    tbody {
                        @for chapter in chapters {
                            tr {
                                td { a href=(names::quizzes_url(chapter.id)) { (chapter.name) } }
                                td { (PreEscaped(chapter.description.as_deref().unwrap_or_default())) }
                                td."text-end" {
                                    (row_actions(names::edit_chapter_url(chapter.id), names::delete_chapter_url(chapter.id), "chapter"))
                                }
                            }
                        }
                    }
                }
            }
            div."col-md-5" {
                h4 { "Add chapter" }
                form method="post" action=(names::chapters_url(subject.id)) {
                    (named_fields("", None))
                    button."btn btn-primary" type="submit" { "Add chapter" }
                }
            }
        }
    }
}

pub fn edit_chapter(chapter: &Chapter) -> Markup {
    html! {
        h2 { "Edit chapter" }
        form method="post" action=(names::edit_chapter_url(chapter.id)) {
            (named_fields(&chapter.name, chapter.description.as_deref()))
            button."btn btn-primary me-2" type="submit" { "Save" }
            a."btn btn-secondary" href=(names::chapters_url(chapter.subject_id)) { "Cancel" }
        }
    }
}

pub fn quizzes_page(chapter: &Chapter, quizzes: &[Quiz]) -> Markup {
    html! {
        nav { a href=(names::chapters_url(chapter.subject_id)) { "Chapters" } " / " (chapter.name) }
        h2 { "Quizzes of " (chapter.name) }
        div."row" {
            div."col-md-7" {
                table."table table-striped" {
                    thead { tr { th { "Quiz" } th { "Date" } th { "Duration" } th {} } }
                    tbody {
                        @for quiz in quizzes {
                            tr {
                                td { a href=(names::questions_url(quiz.id)) { "Quiz #" (quiz.id) } }
                                td { (quiz.date.format("%Y-%m-%d").to_string()) }
                                td { (quiz.duration) }
                                td."text-end" {
                                    (row_actions(names::edit_quiz_url(quiz.id), names::delete_quiz_url(quiz.id), "quiz"))
                                }
                            }
                        }
                    }
                }
            }
            div."col-md-5" {
                h4 { "Add quiz" }
                form method="post" action=(names::quizzes_url(chapter.id)) {
                    (quiz_fields(None))
                    button."btn btn-primary" type="submit" { "Add quiz" }
                }
            }
        }
    }
}

pub fn edit_quiz(quiz: &Quiz) -> Markup {
    html! {
        h2 { "Edit quiz #" (quiz.id) }
        form method="post" action=(names::edit_quiz_url(quiz.id)) {
            (quiz_fields(Some(quiz)))
            button."btn btn-primary me-2" type="submit" { "Save" }
            a."btn btn-secondary" href=(names::quizzes_url(quiz.chapter_id)) { "Cancel" }
        }
    }
}

pub fn questions_page(quiz: &Quiz, questions: &[Question]) -> Markup {
    html! {
        nav { a href=(names::quizzes_url(quiz.chapter_id)) { "Quizzes" } " / Quiz #" (quiz.id) }
        h2 { "Questions of quiz #" (quiz.id) }
        div."row" {
            div."col-md-7" {
                @if questions.is_empty() {
                    p."text-muted" { "No questions yet. Users cannot attempt this quiz until one is added." }
                }
                @for question in questions {
                    div."card mb-2" {
                        div."card-body" {
                            p."fw-bold" { (question.question_text) }
                            ol {
                                @for (n, text) in question.options() {
                                    li."text-success"[n == question.correct_option] { (text) }
                                }
                            }
                            a."btn btn-sm btn-outline-primary me-1" href=(names::edit_question_url(question.id)) { "Edit" }
                            a."btn btn-sm btn-outline-danger" href=(names::delete_question_url(question.id))
                                data-confirm="Delete this question?" { "Delete" }
                        }
                    }
                }
            }
            div."col-md-5" {
                h4 { "Add question" }
                form method="post" action=(names::questions_url(quiz.id)) {
                    (question_fields(None))
                    button."btn btn-primary" type="submit" { "Add question" }
                }
            }
        }
    }
}

pub fn edit_question(question: &Question) -> Markup {
    html! {
        h2 { "Edit question" }
        form method="post" action=(names::edit_question_url(question.id)) {
            (question_fields(Some(question)))
            button."btn btn-primary me-2" type="submit" { "Save" }
            a."btn btn-secondary" href=(names::questions_url(question.quiz_id)) { "Cancel" }
        }
    }
}
