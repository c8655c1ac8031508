//! JSON snapshots on disk.
//!
//! The record store is json-server style: one `db.json` object holding a
//! `results` array of submissions and an `exams` array of exam windows.
//! Submissions and exams can also live in separate files, each a bare array.

use std::path::{Path, PathBuf};

use serde_json::Value;

use examlens_core::traits::RecordSource;

use crate::error::SourceError;

const SUBMISSIONS_KEY: &str = "results";
const EXAMS_KEY: &str = "exams";

/// Reads raw records from JSON files.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    exams_path: Option<PathBuf>,
    name: String,
}

impl JsonFileSource {
    /// A source reading `path`, either a `db.json` object or a bare array of
    /// submissions.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self {
            path,
            exams_path: None,
            name,
        }
    }

    /// Read exam windows from a separate file instead of the `exams` key.
    pub fn with_exams(mut self, exams_path: impl Into<PathBuf>) -> Self {
        self.exams_path = Some(exams_path.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw submission entries.
    pub fn submissions(&self) -> Result<Vec<Value>, SourceError> {
        let value = read_json(&self.path)?;
        entries(value, SUBMISSIONS_KEY, &self.path)
    }

    /// Raw exam-window entries. An absent `exams` key reads as empty.
    pub fn exam_windows(&self) -> Result<Vec<Value>, SourceError> {
        match &self.exams_path {
            Some(path) => entries(read_json(path)?, EXAMS_KEY, path),
            None => match read_json(&self.path)? {
                // A bare submissions array carries no exams.
                Value::Array(_) => Ok(Vec::new()),
                value => entries(value, EXAMS_KEY, &self.path),
            },
        }
    }
}

impl RecordSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_submissions(&self) -> anyhow::Result<Vec<Value>> {
        let values = self.submissions()?;
        tracing::debug!(source = %self.name, count = values.len(), "fetched submissions");
        Ok(values)
    }

    fn fetch_exam_windows(&self) -> anyhow::Result<Vec<Value>> {
        let values = self.exam_windows()?;
        tracing::debug!(source = %self.name, count = values.len(), "fetched exam windows");
        Ok(values)
    }
}

fn read_json(path: &Path) -> Result<Value, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Pull the array under `key` out of a db object, or accept a bare array.
fn entries(value: Value, key: &str, path: &Path) -> Result<Vec<Value>, SourceError> {
    let unexpected = || SourceError::UnexpectedShape {
        path: path.to_path_buf(),
        expected: "a JSON array or an object with `results`/`exams` arrays",
    };

    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(unexpected()),
        },
        _ => Err(unexpected()),
    }
}
