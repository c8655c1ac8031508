//! CSV export.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use ::csv::{QuoteStyle, Terminator, WriterBuilder};
use chrono::SecondsFormat;

use examlens_core::grade::ResultLabel;
use examlens_core::model::SubmissionRecord;

use crate::error::ExportError;

/// MIME type of [`to_delimited_text`] output.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// One output column: a header and how to render a record's cell.
#[derive(Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub extractor: fn(&SubmissionRecord) -> String,
}

impl Column {
    pub fn new(header: &'static str, extractor: fn(&SubmissionRecord) -> String) -> Self {
        Self { header, extractor }
    }

    pub fn cell(&self, record: &SubmissionRecord) -> String {
        (self.extractor)(record)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column").field("header", &self.header).finish()
    }
}

/// The built-in columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    StudentName,
    ExamTitle,
    /// `correct/total`.
    Score,
    /// `xx.x%`.
    Percentage,
    Status,
    Date,
    TimeTaken,
    PassingMarks,
    ExamId,
    UserId,
}

impl ColumnId {
    pub const ALL: [ColumnId; 10] = [
        ColumnId::StudentName,
        ColumnId::ExamTitle,
        ColumnId::Score,
        ColumnId::Percentage,
        ColumnId::Status,
        ColumnId::Date,
        ColumnId::TimeTaken,
        ColumnId::PassingMarks,
        ColumnId::ExamId,
        ColumnId::UserId,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnId::StudentName => "student_name",
            ColumnId::ExamTitle => "exam_title",
            ColumnId::Score => "score",
            ColumnId::Percentage => "percentage",
            ColumnId::Status => "status",
            ColumnId::Date => "date",
            ColumnId::TimeTaken => "time_taken",
            ColumnId::PassingMarks => "passing_marks",
            ColumnId::ExamId => "exam_id",
            ColumnId::UserId => "user_id",
        }
    }

    pub fn column(self) -> Column {
        match self {
            ColumnId::StudentName => Column::new("Student Name", |r| r.student_name.clone()),
            ColumnId::ExamTitle => Column::new("Exam Title", |r| r.exam_title.clone()),
            ColumnId::Score => Column::new("Score", |r| {
                format!("{}/{}", r.correct_answers, r.total_questions)
            }),
            ColumnId::Percentage => Column::new("Percentage", |r| format!("{:.1}%", r.score)),
            ColumnId::Status => Column::new("Status", |r| ResultLabel::of(r).to_string()),
            ColumnId::Date => Column::new("Date", |r| {
                r.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
            }),
            ColumnId::TimeTaken => Column::new("Time Taken", |r| {
                format!("{}:{:02}", r.time_taken / 60, r.time_taken % 60)
            }),
            ColumnId::PassingMarks => {
                Column::new("Passing Marks", |r| format!("{}%", r.passing_marks))
            }
            ColumnId::ExamId => Column::new("Exam ID", |r| r.exam_id.clone()),
            ColumnId::UserId => Column::new("User ID", |r| r.user_id.clone()),
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        ColumnId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| ExportError::UnknownColumn(s.trim().to_string()))
    }
}

/// Student Name, Exam Title, Score, Percentage, Status, Date.
pub fn default_columns() -> Vec<Column> {
    [
        ColumnId::StudentName,
        ColumnId::ExamTitle,
        ColumnId::Score,
        ColumnId::Percentage,
        ColumnId::Status,
        ColumnId::Date,
    ]
    .into_iter()
    .map(ColumnId::column)
    .collect()
}

/// Parse column ids (`student_name`, `score`, ...). An empty list yields the
/// default columns.
pub fn parse_columns<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Column>, ExportError> {
    let ids: Vec<&str> = ids
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.trim().is_empty())
        .collect();
    if ids.is_empty() {
        return Ok(default_columns());
    }
    ids.into_iter()
        .map(|id| id.parse::<ColumnId>().map(ColumnId::column))
        .collect()
}

/// Render records as CSV: a header row, then one row per record in input
/// order. Fields are quoted only when they contain a delimiter, quote or line
/// break; rows end with `\n`.
pub fn to_delimited_text(
    records: &[SubmissionRecord],
    columns: &[Column],
) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptyInput);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.header))?;
    for record in records {
        writer.write_record(columns.iter().map(|c| c.cell(record)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    // Every cell came from a `String`, so the buffer is valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the CSV export to `path`.
pub fn write_csv_export(
    records: &[SubmissionRecord],
    columns: &[Column],
    path: &Path,
) -> Result<(), ExportError> {
    let text = to_delimited_text(records, columns)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    tracing::info!(path = %path.display(), rows = records.len(), "wrote CSV export");
    Ok(())
}
