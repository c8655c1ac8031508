//! Export error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to export. Callers show "no results to export".
    #[error("no results to export")]
    EmptyInput,

    #[error("unknown export column `{0}`")]
    UnknownColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
