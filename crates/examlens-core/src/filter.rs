//! Filter and sort pipeline for the results table.
//!
//! A [`FilterSpec`] is a plain value held by the caller and passed in on every
//! evaluation; nothing here remembers a previous call.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::SubmissionRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterParseError {
    #[error("invalid score range `{0}`, expected `min-max` such as `60-100`")]
    ScoreRange(String),
    #[error("unknown status `{0}`, expected `any`, `passed` or `failed`")]
    Status(String),
    #[error("unknown sort key `{0}`, expected `none`, `score`, `marks` or `exam`")]
    SortKey(String),
}

/// Status predicate. Tests the stored `passed` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    Any,
    Passed,
    Failed,
}

impl StatusFilter {
    fn matches(self, record: &SubmissionRecord) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Passed => record.passed,
            StatusFilter::Failed => !record.passed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "any" | "all" => Ok(StatusFilter::Any),
            "passed" | "pass" => Ok(StatusFilter::Passed),
            "failed" | "fail" => Ok(StatusFilter::Failed),
            _ => Err(FilterParseError::Status(s.to_string())),
        }
    }
}

/// Inclusive score range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}

impl FromStr for ScoreRange {
    type Err = FilterParseError;

    /// Parses the `"min-max"` form used by the score range selector.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FilterParseError::ScoreRange(s.to_string());
        let (min, max) = s.trim().split_once('-').ok_or_else(invalid)?;
        let min: f64 = min.trim().parse().map_err(|_| invalid())?;
        let max: f64 = max.trim().parse().map_err(|_| invalid())?;
        if min > max {
            return Err(invalid());
        }
        Ok(ScoreRange { min, max })
    }
}

impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Inclusive date range; an absent bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at <= end)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// The set of active predicates. Fields left at their default impose no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    /// Case-insensitive substring of the student name.
    pub search_term: String,
    /// Exact exam id.
    pub exam_id: String,
    pub status: StatusFilter,
    pub score_range: Option<ScoreRange>,
    pub date_range: DateRange,
}

impl FilterSpec {
    /// True when no predicate is active. Blank strings count as empty.
    pub fn is_default(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.exam_id.trim().is_empty()
            && self.status == StatusFilter::Any
            && self.score_range.is_none()
            && self.date_range.is_unbounded()
    }

    /// Reset every predicate.
    pub fn clear(&mut self) {
        *self = FilterSpec::default();
    }

    pub fn matches(&self, record: &SubmissionRecord) -> bool {
        let term = &self.search_term;
        if !term.trim().is_empty()
            && !record
                .student_name
                .to_lowercase()
                .contains(&term.to_lowercase())
        {
            return false;
        }

        let exam_id = self.exam_id.trim();
        if !exam_id.is_empty() && record.exam_id != exam_id {
            return false;
        }

        if !self.status.matches(record) {
            return false;
        }

        if let Some(range) = self.score_range {
            if !range.contains(record.score) {
                return false;
            }
        }

        self.date_range.contains(record.timestamp)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    None,
    Score,
    Exam,
}

impl FromStr for SortKey {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(SortKey::None),
            "score" | "marks" => Ok(SortKey::Score),
            "exam" => Ok(SortKey::Exam),
            _ => Err(FilterParseError::SortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }
}

/// Records that passed the filter, plus whether any filter was active.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredView {
    pub records: Vec<SubmissionRecord>,
    pub is_filtered: bool,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Keep the records matching every active predicate, in input order.
pub fn apply_filters(records: &[SubmissionRecord], spec: &FilterSpec) -> FilteredView {
    let is_filtered = !spec.is_default();
    let records = if is_filtered {
        records.iter().filter(|r| spec.matches(r)).cloned().collect()
    } else {
        records.to_vec()
    };
    FilteredView {
        records,
        is_filtered,
    }
}

/// Base letters only: decomposed, combining marks dropped, lowercased.
fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accents and case only break ties between otherwise equal titles.
fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Stable sort. Descending reverses the comparator, so ties keep their input
/// order in both directions.
pub fn sort_records(records: &mut [SubmissionRecord], sort: SortSpec) {
    let compare: fn(&SubmissionRecord, &SubmissionRecord) -> Ordering = match sort.key {
        SortKey::None => return,
        SortKey::Score => |a: &SubmissionRecord, b: &SubmissionRecord| a.score.total_cmp(&b.score),
        SortKey::Exam => |a: &SubmissionRecord, b: &SubmissionRecord| {
            compare_titles(&a.exam_title, &b.exam_title)
        }
    };

    match sort.direction {
        SortDirection::Asc => records.sort_by(compare),
        SortDirection::Desc => records.sort_by(|a, b| compare(a, b).reverse()),
    }
}

/// Filter, then sort the survivors.
pub fn apply_view(records: &[SubmissionRecord], spec: &FilterSpec, sort: SortSpec) -> FilteredView {
    let mut view = apply_filters(records, spec);
    sort_records(&mut view.records, sort);
    view
}
