//! The record-source seam.
//!
//! Implemented by `examlens-source` for JSON snapshots on disk and by an
//! in-memory source for tests. The engine itself never fetches anything;
//! callers fetch through a source and hand the values to
//! [`normalize_values`](crate::normalize::normalize_values).

use serde_json::Value;

/// A store of raw submissions and exam windows.
pub trait RecordSource {
    /// Human-readable source name (e.g. a file path).
    fn name(&self) -> &str;

    /// All raw submission entries, as stored.
    fn fetch_submissions(&self) -> anyhow::Result<Vec<Value>>;

    /// All raw exam-window entries, as stored.
    fn fetch_exam_windows(&self) -> anyhow::Result<Vec<Value>>;
}
