//! Record builders shared by unit tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::model::{Status, SubmissionRecord};

pub(crate) fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
}

pub(crate) fn record(id: &str, score: f64, passed: bool) -> SubmissionRecord {
    SubmissionRecord {
        id: id.into(),
        exam_id: "exam-1".into(),
        user_id: "user-1".into(),
        student_name: "Ada Lovelace".into(),
        exam_title: "Algebra".into(),
        score,
        total_questions: 10,
        correct_answers: 7,
        wrong_answers: 2,
        unanswered_questions: 1,
        passed,
        passing_marks: 60.0,
        time_taken: 600,
        timestamp: at(1),
        status: Status::from_passed(passed),
        synthesized: false,
    }
}

pub(crate) fn placeholder(exam_id: &str) -> SubmissionRecord {
    SubmissionRecord {
        id: format!("failed-{exam_id}"),
        exam_id: exam_id.into(),
        score: 0.0,
        total_questions: 0,
        correct_answers: 0,
        wrong_answers: 0,
        unanswered_questions: 0,
        time_taken: 0,
        synthesized: true,
        ..record("placeholder", 0.0, false)
    }
}

/// Completed records with the given scores, ids `r0`, `r1`, ...
pub(crate) fn scored(scores: &[f64]) -> Vec<SubmissionRecord> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| record(&format!("r{i}"), score, true))
        .collect()
}
