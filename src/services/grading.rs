// src/services/grading.rs

use std::collections::{BTreeMap, HashMap};

use crate::names::ANSWER_FIELD_PREFIX;

/// Answers submitted for one quiz: question id -> selected option (1-4).
///
/// Built once from the raw form fields. Fields that are not `question_{id}`, ids that
/// do not parse and options outside 1-4 are dropped, so they grade as unanswered.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: BTreeMap<i64, u8>,
}

impl AnswerSheet {
    pub fn from_form(fields: &HashMap<String, String>) -> Self {
        let answers = fields
            .iter()
            .filter_map(|(key, value)| {
                let question_id = key.strip_prefix(ANSWER_FIELD_PREFIX)?.parse::<i64>().ok()?;
                let option = value.trim().parse::<u8>().ok().filter(|o| (1..=4).contains(o))?;
                Some((question_id, option))
            })
            .collect();

        Self { answers }
    }

    pub fn selected(&self, question_id: i64) -> Option<u8> {
        self.answers.get(&question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Correct option of one question.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct AnswerKey {
    pub id: i64,
    pub correct_option: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade {
    pub score: i64,
    pub total_questions: i64,
}

/// One point per question whose selected option equals the correct one.
pub fn grade(keys: &[AnswerKey], sheet: &AnswerSheet) -> Grade {
    let score = keys
        .iter()
        .filter(|key| sheet.selected(key.id).map(i64::from) == Some(key.correct_option))
        .count() as i64;

    Grade {
        score,
        total_questions: keys.len() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn sheet_keeps_only_valid_answer_fields() {
        let sheet = AnswerSheet::from_form(&form(&[
            ("question_1", "2"),
            ("question_2", "5"),
            ("question_x", "1"),
            ("question_3", "abc"),
            ("csrf", "1"),
            ("question_4", " 4 "),
        ]));

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.selected(1), Some(2));
        assert_eq!(sheet.selected(2), None);
        assert_eq!(sheet.selected(4), Some(4));
    }

    #[test]
    fn grade_counts_exact_matches() {
        let keys = [
            AnswerKey { id: 10, correct_option: 1 },
            AnswerKey { id: 11, correct_option: 3 },
        ];
        let sheet = AnswerSheet::from_form(&form(&[("question_10", "1"), ("question_11", "2")]));

        assert_eq!(grade(&keys, &sheet), Grade { score: 1, total_questions: 2 });
    }

    #[test]
    fn unanswered_questions_count_as_wrong() {
        let keys = [
            AnswerKey { id: 1, correct_option: 4 },
            AnswerKey { id: 2, correct_option: 4 },
            AnswerKey { id: 3, correct_option: 4 },
        ];
        let sheet = AnswerSheet::from_form(&form(&[("question_2", "4")]));

        assert_eq!(grade(&keys, &sheet), Grade { score: 1, total_questions: 3 });
    }

    #[test]
    fn answers_for_other_quizzes_are_ignored() {
        let keys = [AnswerKey { id: 1, correct_option: 2 }];
        let sheet = AnswerSheet::from_form(&form(&[("question_99", "2")]));

        assert_eq!(grade(&keys, &sheet), Grade { score: 0, total_questions: 1 });
    }
}
