//! Core data model types for examlens.
//!
//! Raw types mirror the record store's camelCase JSON and are read
//! leniently: any field may be missing or carry the wrong type without
//! failing the batch. Normalized types are what every other module in the
//! engine works on.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Display text substituted for names and titles missing from the raw data.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Identifier substituted for missing foreign keys.
pub const UNKNOWN_ID: &str = "unknown";

/// Outcome tag of a normalized submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The stored `passed` flag is true.
    Completed,
    /// An explicit fail, or a placeholder for a missed exam window.
    Failed,
}

impl Status {
    /// Derive the status from the authoritative `passed` flag.
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Status::Completed
        } else {
            Status::Failed
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Completed => write!(f, "completed"),
            Status::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Ok(Status::Completed),
            "failed" => Ok(Status::Failed),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// A canonical exam submission. Never mutated once normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// Opaque unique identifier.
    pub id: String,
    /// Identifier of the exam this submission belongs to.
    pub exam_id: String,
    /// Identifier of the submitting student.
    pub user_id: String,
    /// Student display name.
    pub student_name: String,
    /// Exam display title.
    pub exam_title: String,
    /// Percentage score, nominally within 0..=100.
    pub score: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub unanswered_questions: u32,
    /// Authoritative pass/fail flag.
    pub passed: bool,
    /// Pass threshold copied from the exam at submission time.
    pub passing_marks: f64,
    /// Time taken in seconds.
    pub time_taken: u64,
    /// When the submission happened.
    pub timestamp: DateTime<Utc>,
    pub status: Status,
    /// True for placeholders created for exam windows that closed unanswered.
    #[serde(default)]
    pub synthesized: bool,
}

impl SubmissionRecord {
    /// Whether this record counts towards score aggregates.
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// Whether `correct + wrong + unanswered == total`.
    pub fn answer_counts_consistent(&self) -> bool {
        let sum = u64::from(self.correct_answers)
            + u64::from(self.wrong_answers)
            + u64::from(self.unanswered_questions);
        sum == u64::from(self.total_questions)
    }

    /// Whether the score lies within the percentage domain.
    pub fn score_in_range(&self) -> bool {
        (0.0..=100.0).contains(&self.score)
    }
}

/// An exam's availability window, used to join titles and to detect
/// missed exams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamWindow {
    pub id: String,
    pub title: String,
    pub passing_marks: f64,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
}

/// A submission as returned by the record store, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub exam_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub student_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub exam_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_questions: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub correct_answers: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub wrong_answers: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub unanswered_questions: Option<u32>,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub passed: Option<bool>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub passing_marks: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub time_taken: Option<f64>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// An exam record as returned by the record store, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExamWindow {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub passing_marks: Option<f64>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub end_time: Option<DateTime<Utc>>,
}

/// Parse the date representations found in the record store.
///
/// Accepts RFC 3339 (`2024-03-01T09:30:00Z`), naive date-times read as UTC
/// (`2024-03-01T09:30:00`, `2024-03-01 09:30:00`) and bare dates
/// (`2024-03-01`, midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Convert epoch milliseconds to a UTC timestamp.
pub fn from_epoch_millis(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

/// Field deserializers that read a value of the wrong shape as absent.
mod lenient {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn as_f64(value: &Value) -> Option<f64> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite())
    }

    pub(super) fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub(super) fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(as_f64))
    }

    pub(super) fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(Option::<Value>::deserialize(d)?
            .as_ref()
            .and_then(as_f64)
            .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| v as u32))
    }

    pub(super) fn boolean<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Bool(b)) => Some(b),
            Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }

    pub(super) fn timestamp<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) => super::parse_timestamp(&s),
            Some(Value::Number(n)) => n.as_i64().and_then(super::from_epoch_millis),
            _ => None,
        })
    }
}
