//! Record warnings.
//!
//! Warnings describe data problems found while normalizing a batch. They are
//! reported alongside the result instead of aborting it, so one bad record
//! never hides the rest of the batch.

use serde::Serialize;
use thiserror::Error;

/// A recoverable problem with a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordWarning {
    /// A required field was missing or unreadable; a default was used.
    #[error("record {record_id}: field `{field}` is missing or unreadable, using default")]
    MalformedRecord { record_id: String, field: String },

    /// `correct + wrong + unanswered` does not equal `total`.
    #[error(
        "record {record_id}: answer counts {correct}+{wrong}+{unanswered} do not add up to {total}"
    )]
    AnswerCountMismatch {
        record_id: String,
        correct: u32,
        wrong: u32,
        unanswered: u32,
        total: u32,
    },

    /// The score lies outside 0..=100. The stored value is kept.
    #[error("record {record_id}: score {score} is outside 0..=100")]
    ScoreOutOfRange { record_id: String, score: f64 },
}

/// Broad classification of a [`RecordWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    Malformed,
    InvariantViolation,
}

impl RecordWarning {
    pub(crate) fn malformed(record_id: &str, field: &str) -> Self {
        RecordWarning::MalformedRecord {
            record_id: record_id.to_string(),
            field: field.to_string(),
        }
    }

    /// The id of the record this warning is about.
    pub fn record_id(&self) -> &str {
        match self {
            RecordWarning::MalformedRecord { record_id, .. }
            | RecordWarning::AnswerCountMismatch { record_id, .. }
            | RecordWarning::ScoreOutOfRange { record_id, .. } => record_id,
        }
    }

    pub fn kind(&self) -> WarningKind {
        match self {
            RecordWarning::MalformedRecord { .. } => WarningKind::Malformed,
            RecordWarning::AnswerCountMismatch { .. } | RecordWarning::ScoreOutOfRange { .. } => {
                WarningKind::InvariantViolation
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_messages() {
        let w = RecordWarning::malformed("r1", "score");
        assert_eq!(
            w.to_string(),
            "record r1: field `score` is missing or unreadable, using default"
        );
        assert_eq!(w.kind(), WarningKind::Malformed);
        assert_eq!(w.record_id(), "r1");

        let w = RecordWarning::AnswerCountMismatch {
            record_id: "r2".into(),
            correct: 5,
            wrong: 2,
            unanswered: 1,
            total: 10,
        };
        assert!(w.to_string().contains("5+2+1 do not add up to 10"));
        assert_eq!(w.kind(), WarningKind::InvariantViolation);
    }

    #[test]
    fn warning_serializes_with_kind_tag() {
        let w = RecordWarning::ScoreOutOfRange {
            record_id: "r3".into(),
            score: 120.0,
        };
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["kind"], "score_out_of_range");
        assert_eq!(json["record_id"], "r3");
    }
}
