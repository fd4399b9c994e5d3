// src/services/reports.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// One attempt of the current user, with the subject reached through quiz and chapter.
/// `subject_name` is `None` when that chain is broken.
#[derive(Debug, Clone, FromRow)]
pub struct AttemptRow {
    pub subject_name: Option<String>,
    pub score: i64,
    pub total_questions: i64,
    pub timestamp: DateTime<Utc>,
}

/// Chart data for `/user/summary`, as parallel label/value arrays.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub subject_labels: Vec<String>,
    pub subject_averages: Vec<f64>,
    pub month_labels: Vec<String>,
    pub month_counts: Vec<i64>,
}

/// Builds the per-user summary from attempts in chronological order.
///
/// Subjects and months appear in first-seen order. Averages are the mean percentage
/// over attempts with at least one question, rounded to one decimal place. Every
/// attempt counts towards its month.
pub fn summarize_user(attempts: &[AttemptRow]) -> UserSummary {
    let mut subjects: Vec<(String, f64, u32)> = Vec::new();
    let mut months: Vec<(String, i64)> = Vec::new();

    for attempt in attempts {
        let month = attempt.timestamp.format("%b %Y").to_string();
        match months.iter_mut().find(|(label, _)| *label == month) {
            Some((_, count)) => *count += 1,
            None => months.push((month, 1)),
        }

        let Some(subject) = attempt.subject_name.as_deref() else {
            tracing::warn!("Skipping attempt with unresolved subject in user summary");
            continue;
        };
        let Some(pct) = percentage(attempt.score, attempt.total_questions) else {
            continue;
        };
        match subjects.iter_mut().find(|(name, _, _)| name.as_str() == subject) {
            Some((_, total, count)) => {
                *total += pct;
                *count += 1;
            }
            None => subjects.push((subject.to_string(), pct, 1)),
        }
    }

    let mut summary = UserSummary::default();
    for (name, total, count) in subjects {
        summary.subject_labels.push(name);
        summary.subject_averages.push(round1(total / f64::from(count)));
    }
    for (label, count) in months {
        summary.month_labels.push(label);
        summary.month_counts.push(count);
    }
    summary
}

/// A subject joined (left) with one of its attempts, if any.
#[derive(Debug, Clone, FromRow)]
pub struct SubjectAttemptRow {
    pub subject_id: i64,
    pub subject_name: String,
    pub score: Option<i64>,
    pub total_questions: Option<i64>,
}

/// One line of `/admin/summary`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectStats {
    pub subject_id: i64,
    pub subject_name: String,
    /// Best percentage scored in any quiz of the subject; 0 without attempts.
    pub top_score: f64,
    pub attempts: i64,
}

/// Builds one record per subject, in the order subjects first appear in `rows`.
pub fn summarize_subjects(rows: &[SubjectAttemptRow]) -> Vec<SubjectStats> {
    let mut stats: Vec<SubjectStats> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.subject_id).or_insert_with(|| {
            stats.push(SubjectStats {
                subject_id: row.subject_id,
                subject_name: row.subject_name.clone(),
                top_score: 0.0,
                attempts: 0,
            });
            stats.len() - 1
        });

        let (Some(score), Some(total)) = (row.score, row.total_questions) else {
            continue;
        };
        let entry = &mut stats[slot];
        entry.attempts += 1;
        if let Some(pct) = percentage(score, total) {
            if pct > entry.top_score {
                entry.top_score = pct;
            }
        }
    }

    stats
}

fn percentage(score: i64, total_questions: i64) -> Option<f64> {
    (total_questions > 0).then(|| score as f64 / total_questions as f64 * 100.0)
}

/// One decimal place, ties to even on the exact stored value.
fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn attempt(subject: Option<&str>, score: i64, total: i64, y: i32, m: u32, d: u32) -> AttemptRow {
        AttemptRow {
            subject_name: subject.map(str::to_string),
            score,
            total_questions: total,
            timestamp: Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn subject_average_is_mean_of_percentages() {
        let summary = summarize_user(&[
            attempt(Some("Math"), 4, 5, 2025, 3, 1),
            attempt(Some("Math"), 3, 5, 2025, 3, 2),
        ]);

        assert_eq!(summary.subject_labels, vec!["Math"]);
        assert_eq!(summary.subject_averages, vec![70.0]);
    }

    #[test]
    fn averages_are_rounded_to_one_decimal() {
        let summary = summarize_user(&[
            attempt(Some("Physics"), 1, 3, 2025, 1, 5),
            attempt(Some("Physics"), 1, 3, 2025, 1, 6),
        ]);
        assert_eq!(summary.subject_averages, vec![33.3]);
    }

    #[test]
    fn halfway_averages_round_to_even() {
        assert_eq!(round1(12.25), 12.2);
        assert_eq!(round1(12.75), 12.8);
        assert_eq!(round1(0.15), 0.1);
        assert_eq!(round1(33.333), 33.3);
        assert_eq!(round1(70.0), 70.0);
    }

    #[test]
    fn months_keep_first_seen_order() {
        let summary = summarize_user(&[
            attempt(Some("Math"), 1, 1, 2024, 12, 30),
            attempt(Some("Chemistry"), 0, 1, 2025, 1, 2),
            attempt(Some("Math"), 1, 2, 2025, 1, 20),
        ]);

        assert_eq!(summary.month_labels, vec!["Dec 2024", "Jan 2025"]);
        assert_eq!(summary.month_counts, vec![1, 2]);
        assert_eq!(summary.subject_labels, vec!["Math", "Chemistry"]);
        assert_eq!(summary.subject_averages, vec![75.0, 0.0]);
    }

    #[test]
    fn broken_chain_and_empty_quiz_are_skipped_for_averages() {
        let summary = summarize_user(&[
            attempt(None, 1, 1, 2025, 2, 1),
            attempt(Some("Math"), 0, 0, 2025, 2, 2),
            attempt(Some("Math"), 1, 2, 2025, 2, 3),
        ]);

        assert_eq!(summary.subject_labels, vec!["Math"]);
        assert_eq!(summary.subject_averages, vec![50.0]);
        assert_eq!(summary.month_counts, vec![3]);
    }

    #[test]
    fn subject_stats_track_top_percentage_and_attempts() {
        let rows = [
            SubjectAttemptRow { subject_id: 1, subject_name: "Math".into(), score: Some(1), total_questions: Some(2) },
            SubjectAttemptRow { subject_id: 1, subject_name: "Math".into(), score: Some(4), total_questions: Some(5) },
            SubjectAttemptRow { subject_id: 2, subject_name: "History".into(), score: None, total_questions: None },
            SubjectAttemptRow { subject_id: 1, subject_name: "Math".into(), score: Some(0), total_questions: Some(0) },
        ];

        let stats = summarize_subjects(&rows);

        assert_eq!(
            stats,
            vec![
                SubjectStats { subject_id: 1, subject_name: "Math".into(), top_score: 80.0, attempts: 3 },
                SubjectStats { subject_id: 2, subject_name: "History".into(), top_score: 0.0, attempts: 0 },
            ]
        );
    }
}
