//! In-memory source for tests and embedding.

use serde_json::Value;

use examlens_core::traits::RecordSource;

/// Serves a fixed set of raw values.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    submissions: Vec<Value>,
    exams: Vec<Value>,
}

impl MemorySource {
    pub fn new(submissions: Vec<Value>, exams: Vec<Value>) -> Self {
        Self { submissions, exams }
    }

    /// Build from a db-style object (`results` and `exams` arrays). Missing
    /// or non-array keys read as empty.
    pub fn from_db(db: &Value) -> Self {
        let array = |key: &str| db.get(key).and_then(Value::as_array).cloned().unwrap_or_default();
        Self::new(array("results"), array("exams"))
    }
}

impl RecordSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch_submissions(&self) -> anyhow::Result<Vec<Value>> {
        Ok(self.submissions.clone())
    }

    fn fetch_exam_windows(&self) -> anyhow::Result<Vec<Value>> {
        Ok(self.exams.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_db_object() {
        let source = MemorySource::from_db(&json!({
            "results": [{"id": 1}, {"id": 2}],
            "exams": "not an array",
        }));
        assert_eq!(source.name(), "memory");
        assert_eq!(source.fetch_submissions().unwrap().len(), 2);
        assert!(source.fetch_exam_windows().unwrap().is_empty());
    }
}
