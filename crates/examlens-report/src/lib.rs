//! examlens-report: flat exports of exam results.
//!
//! Turns a subset of normalized records into RFC 4180 CSV text with a
//! caller-chosen, ordered set of columns.

pub mod csv;
pub mod error;

pub use crate::csv::{
    default_columns, parse_columns, to_delimited_text, write_csv_export, Column, ColumnId,
    CSV_MIME_TYPE,
};
pub use error::ExportError;
