// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub question_text: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,

    /// Number (1-4) of the correct option.
    pub correct_option: i64,
}

impl Question {
    /// Options paired with their 1-based number.
    pub fn options(&self) -> [(i64, &str); 4] {
        [
            (1, self.option1.as_str()),
            (2, self.option2.as_str()),
            (3, self.option3.as_str()),
            (4, self.option4.as_str()),
        ]
    }
}

/// Create/edit form for questions.
#[derive(Debug, Deserialize, Validate)]
pub struct QuestionForm {
    #[validate(length(min = 1, max = 1000, message = "Question text is required."))]
    pub question_text: String,
    #[validate(length(min = 1, max = 200, message = "Every option needs a text."))]
    pub option1: String,
    #[validate(length(min = 1, max = 200, message = "Every option needs a text."))]
    pub option2: String,
    #[validate(length(min = 1, max = 200, message = "Every option needs a text."))]
    pub option3: String,
    #[validate(length(min = 1, max = 200, message = "Every option needs a text."))]
    pub option4: String,
    #[validate(range(min = 1, max = 4, message = "Correct option must be between 1 and 4."))]
    pub correct_option: i64,
}
