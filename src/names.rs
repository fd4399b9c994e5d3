pub const HOME_URL: &str = "/";
pub const LOGIN_URL: &str = "/login";
pub const REGISTER_URL: &str = "/register";
pub const LOGOUT_URL: &str = "/logout";

pub const USER_DASHBOARD_URL: &str = "/user/dashboard";
pub const USER_SCORES_URL: &str = "/user/scores";
pub const USER_SUMMARY_URL: &str = "/user/summary";

pub const ADMIN_DASHBOARD_URL: &str = "/admin/dashboard";
pub const ADMIN_SUBJECTS_URL: &str = "/admin/subjects";
pub const ADMIN_CREATE_QUIZ_URL: &str = "/admin/create-quiz";
pub const ADMIN_ALL_QUIZZES_URL: &str = "/admin/all-quizzes";
pub const ADMIN_SUMMARY_URL: &str = "/admin/summary";

pub const SESSION_COOKIE_NAME: &str = "quiz_master_session";
pub const FLASH_COOKIE_NAME: &str = "flash";

/// Prefix of the form fields carrying a quiz answer, followed by the question id.
pub const ANSWER_FIELD_PREFIX: &str = "question_";

pub fn start_quiz_url(quiz_id: i64) -> String {
    format!("/user/quiz/{quiz_id}")
}

pub fn submit_quiz_url(quiz_id: i64) -> String {
    format!("/user/submit_quiz/{quiz_id}")
}

pub fn answer_field(question_id: i64) -> String {
    format!("{ANSWER_FIELD_PREFIX}{question_id}")
}

pub fn edit_subject_url(id: i64) -> String {
    format!("/admin/subject/{id}/edit")
}

pub fn delete_subject_url(id: i64) -> String {
    format!("/admin/subject/{id}/delete")
}

pub fn chapters_url(subject_id: i64) -> String {
    format!("/admin/chapters/{subject_id}")
}

pub fn edit_chapter_url(id: i64) -> String {
    format!("/admin/chapter/{id}/edit")
}

pub fn delete_chapter_url(id: i64) -> String {
    format!("/admin/chapter/{id}/delete")
}

pub fn quizzes_url(chapter_id: i64) -> String {
    format!("/admin/quizzes/{chapter_id}")
}

pub fn edit_quiz_url(id: i64) -> String {
    format!("/admin/quiz/{id}/edit")
}

pub fn delete_quiz_url(id: i64) -> String {
    format!("/admin/quiz/{id}/delete")
}

pub fn questions_url(quiz_id: i64) -> String {
    format!("/admin/questions/{quiz_id}")
}

pub fn edit_question_url(id: i64) -> String {
    format!("/admin/question/{id}/edit")
}

pub fn delete_question_url(id: i64) -> String {
    format!("/admin/question/{id}/delete")
}

pub fn chapters_api_url(subject_id: i64) -> String {
    format!("/api/chapters/{subject_id}")
}
