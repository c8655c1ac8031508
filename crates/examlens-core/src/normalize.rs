//! Record normalization.
//!
//! Converts raw submissions and exam windows into canonical
//! [`SubmissionRecord`]s. Submissions are joined to their exam window, and a
//! failed placeholder is synthesized for every window that closed without a
//! submission from the viewing student.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RecordWarning;
use crate::model::{
    ExamWindow, RawExamWindow, RawSubmission, Status, SubmissionRecord, UNKNOWN_ID,
    UNKNOWN_LABEL,
};

/// Inputs to [`normalize`] besides the records themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    /// Student whose missed exams become placeholders. `None` means the
    /// records span many students and nothing is synthesized.
    pub viewer_user_id: Option<String>,
    /// Reference time for deciding whether an exam window has closed.
    pub now: DateTime<Utc>,
    /// Text used for missing names and titles.
    pub unknown_label: String,
}

impl NormalizeOptions {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            viewer_user_id: None,
            now,
            unknown_label: UNKNOWN_LABEL.to_string(),
        }
    }

    pub fn with_viewer(mut self, viewer_user_id: impl Into<String>) -> Self {
        self.viewer_user_id = Some(viewer_user_id.into());
        self
    }

    pub fn with_unknown_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_label = label.into();
        self
    }
}

/// Normalized records plus the warnings raised while producing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Normalized {
    pub records: Vec<SubmissionRecord>,
    pub warnings: Vec<RecordWarning>,
}

fn report(warnings: &mut Vec<RecordWarning>, warning: RecordWarning) {
    tracing::warn!("{warning}");
    warnings.push(warning);
}

/// Read raw submissions out of JSON values.
///
/// Entries that are not JSON objects carry no usable data; they are dropped
/// and reported as malformed, keyed by their position (`#3`).
pub fn parse_submissions(values: &[Value]) -> (Vec<RawSubmission>, Vec<RecordWarning>) {
    parse_entries(values)
}

/// Read raw exam windows out of JSON values. See [`parse_submissions`].
pub fn parse_exam_windows(values: &[Value]) -> (Vec<RawExamWindow>, Vec<RecordWarning>) {
    parse_entries(values)
}

fn parse_entries<'a, T: Deserialize<'a>>(values: &'a [Value]) -> (Vec<T>, Vec<RecordWarning>) {
    let mut items = Vec::with_capacity(values.len());
    let mut warnings = Vec::new();

    for (index, value) in values.iter().enumerate() {
        match T::deserialize(value) {
            Ok(item) => items.push(item),
            Err(e) => {
                tracing::debug!(index, error = %e, "dropping unreadable entry");
                report(&mut warnings, RecordWarning::malformed(&format!("#{index}"), "*"));
            }
        }
    }

    (items, warnings)
}

/// Turn raw exam records into windows.
///
/// A window without an id or a readable `endTime` can be neither joined nor
/// checked for closure, so it is dropped with a warning.
pub fn normalize_exam_windows(
    raw: &[RawExamWindow],
    unknown_label: &str,
) -> (Vec<ExamWindow>, Vec<RecordWarning>) {
    let mut windows = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();

    for (index, exam) in raw.iter().enumerate() {
        let Some(id) = non_blank(&exam.id) else {
            report(&mut warnings, RecordWarning::malformed(&format!("#{index}"), "id"));
            continue;
        };
        let Some(end_time) = exam.end_time else {
            report(&mut warnings, RecordWarning::malformed(&id, "endTime"));
            continue;
        };

        windows.push(ExamWindow {
            title: non_blank(&exam.title).unwrap_or_else(|| unknown_label.to_string()),
            passing_marks: exam.passing_marks.unwrap_or(0.0),
            start_time: exam.start_time,
            end_time,
            id,
        });
    }

    (windows, warnings)
}

/// Normalize a batch of raw submissions against the exam windows.
///
/// Real submissions come first, in input order, followed by one placeholder
/// per missed window in window order.
pub fn normalize(
    raw: &[RawSubmission],
    windows: &[ExamWindow],
    options: &NormalizeOptions,
) -> Normalized {
    let mut by_id: HashMap<&str, &ExamWindow> = HashMap::new();
    for window in windows {
        by_id.entry(window.id.as_str()).or_insert(window);
    }

    let mut warnings = Vec::new();
    let mut records: Vec<SubmissionRecord> = raw
        .iter()
        .enumerate()
        .map(|(index, submission)| {
            normalize_submission(index, submission, &by_id, options, &mut warnings)
        })
        .collect();

    let real_count = records.len();
    if let Some(viewer) = options.viewer_user_id.as_deref() {
        let placeholders = synthesize_missed(&records, windows, viewer, options);
        records.extend(placeholders);
    }

    tracing::debug!(
        submissions = real_count,
        placeholders = records.len() - real_count,
        warnings = warnings.len(),
        "normalized submissions"
    );

    Normalized { records, warnings }
}

/// Parse and normalize straight from the record store's JSON arrays.
pub fn normalize_values(
    submissions: &[Value],
    exams: &[Value],
    options: &NormalizeOptions,
) -> Normalized {
    let (raw_submissions, mut warnings) = parse_submissions(submissions);
    let (raw_exams, exam_warnings) = parse_exam_windows(exams);
    let (windows, window_warnings) = normalize_exam_windows(&raw_exams, &options.unknown_label);

    let mut normalized = normalize(&raw_submissions, &windows, options);

    warnings.extend(exam_warnings);
    warnings.extend(window_warnings);
    warnings.append(&mut normalized.warnings);
    normalized.warnings = warnings;
    normalized
}

/// Check every record for answer-count and score-range violations.
pub fn check_invariants(records: &[SubmissionRecord]) -> Vec<RecordWarning> {
    records.iter().flat_map(invariant_violations).collect()
}

fn invariant_violations(record: &SubmissionRecord) -> Vec<RecordWarning> {
    let mut found = Vec::new();
    if !record.answer_counts_consistent() {
        found.push(RecordWarning::AnswerCountMismatch {
            record_id: record.id.clone(),
            correct: record.correct_answers,
            wrong: record.wrong_answers,
            unanswered: record.unanswered_questions,
            total: record.total_questions,
        });
    }
    if !record.score_in_range() {
        found.push(RecordWarning::ScoreOutOfRange {
            record_id: record.id.clone(),
            score: record.score,
        });
    }
    found
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn normalize_submission(
    index: usize,
    raw: &RawSubmission,
    windows: &HashMap<&str, &ExamWindow>,
    options: &NormalizeOptions,
    warnings: &mut Vec<RecordWarning>,
) -> SubmissionRecord {
    let id = non_blank(&raw.id).unwrap_or_else(|| {
        let id = format!("unknown-{index}");
        report(warnings, RecordWarning::malformed(&id, "id"));
        id
    });

    let mut required_id = |value: &Option<String>, field: &str| {
        non_blank(value).unwrap_or_else(|| {
            report(warnings, RecordWarning::malformed(&id, field));
            UNKNOWN_ID.to_string()
        })
    };
    let exam_id = required_id(&raw.exam_id, "examId");
    let user_id = required_id(&raw.user_id, "userId");

    let window = windows.get(exam_id.as_str()).copied();

    let score = raw.score.unwrap_or_else(|| {
        report(warnings, RecordWarning::malformed(&id, "score"));
        0.0
    });
    let passed = raw.passed.unwrap_or_else(|| {
        report(warnings, RecordWarning::malformed(&id, "passed"));
        false
    });
    let timestamp = raw.timestamp.unwrap_or_else(|| {
        report(warnings, RecordWarning::malformed(&id, "timestamp"));
        window.map(|w| w.end_time).unwrap_or_default()
    });

    let record = SubmissionRecord {
        exam_id,
        user_id,
        student_name: non_blank(&raw.student_name)
            .unwrap_or_else(|| options.unknown_label.clone()),
        exam_title: non_blank(&raw.exam_title)
            .or_else(|| window.map(|w| w.title.clone()))
            .unwrap_or_else(|| options.unknown_label.clone()),
        score,
        total_questions: raw.total_questions.unwrap_or(0),
        correct_answers: raw.correct_answers.unwrap_or(0),
        wrong_answers: raw.wrong_answers.unwrap_or(0),
        unanswered_questions: raw.unanswered_questions.unwrap_or(0),
        passed,
        passing_marks: raw
            .passing_marks
            .or_else(|| window.map(|w| w.passing_marks))
            .unwrap_or(0.0),
        time_taken: raw
            .time_taken
            .filter(|t| *t > 0.0)
            .map(|t| t.round() as u64)
            .unwrap_or(0),
        timestamp,
        status: Status::from_passed(passed),
        synthesized: false,
        id,
    };

    for violation in invariant_violations(&record) {
        report(warnings, violation);
    }

    record
}

fn synthesize_missed(
    records: &[SubmissionRecord],
    windows: &[ExamWindow],
    viewer: &str,
    options: &NormalizeOptions,
) -> Vec<SubmissionRecord> {
    let mut seen: HashSet<&str> = records
        .iter()
        .filter(|r| r.user_id == viewer)
        .map(|r| r.exam_id.as_str())
        .collect();

    let student_name = records
        .iter()
        .find(|r| r.user_id == viewer && r.student_name != options.unknown_label)
        .map(|r| r.student_name.clone())
        .unwrap_or_else(|| options.unknown_label.clone());

    let mut placeholders = Vec::new();
    for window in windows {
        if window.end_time >= options.now || !seen.insert(window.id.as_str()) {
            continue;
        }
        placeholders.push(SubmissionRecord {
            id: format!("failed-{}", window.id),
            exam_id: window.id.clone(),
            user_id: viewer.to_string(),
            student_name: student_name.clone(),
            exam_title: window.title.clone(),
            score: 0.0,
            total_questions: 0,
            correct_answers: 0,
            wrong_answers: 0,
            unanswered_questions: 0,
            passed: false,
            passing_marks: window.passing_marks,
            time_taken: 0,
            timestamp: window.end_time,
            status: Status::Failed,
            synthesized: true,
        });
    }
    placeholders
}
