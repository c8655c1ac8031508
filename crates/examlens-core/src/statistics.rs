//! Summary statistics over a normalized record set.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{Status, SubmissionRecord};

/// Scalar aggregates for the results dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Distinct students.
    pub total_students: usize,
    /// Distinct exams.
    pub total_exams: usize,
    /// Mean score of completed records, 0 when there are none.
    pub average_score: f64,
    /// Best score of completed records, 0 when there are none.
    pub highest_score: f64,
    /// Worst score of completed records, 0 when there are none.
    pub lowest_score: f64,
    /// Records with status `failed`, placeholders included.
    pub failed_count: usize,
    /// Completed records as a percentage of all records.
    pub pass_rate: f64,
}

impl Statistics {
    /// The average rounded half away from zero, as shown on the dashboard.
    pub fn rounded_average(&self) -> f64 {
        self.average_score.round()
    }
}

/// Compute the dashboard statistics.
///
/// Score aggregates only consider completed records; a set without any
/// yields zeros rather than NaN.
pub fn compute_statistics(records: &[SubmissionRecord]) -> Statistics {
    let total_students = records
        .iter()
        .map(|r| r.user_id.as_str())
        .collect::<HashSet<_>>()
        .len();
    let total_exams = records
        .iter()
        .map(|r| r.exam_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let completed: Vec<f64> = records
        .iter()
        .filter(|r| r.is_completed())
        .map(|r| r.score)
        .collect();

    let failed_count = records
        .iter()
        .filter(|r| r.status == Status::Failed)
        .count();

    Statistics {
        total_students,
        total_exams,
        average_score: mean(&completed),
        highest_score: completed.iter().copied().reduce(f64::max).unwrap_or(0.0),
        lowest_score: completed.iter().copied().reduce(f64::min).unwrap_or(0.0),
        failed_count,
        pass_rate: percentage(completed.len(), records.len()),
    }
}

/// Arithmetic mean. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// `part / total` as a percentage. Returns 0.0 when `total` is zero.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}
