//! Source error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when fetching raw records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file does not exist.
    #[error("source file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("failed to parse {} as JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON, but not the layout we expected.
    #[error("unexpected layout in {}: expected {expected}", path.display())]
    UnexpectedShape {
        path: PathBuf,
        expected: &'static str,
    },
}
