//! examlens-core: results aggregation and filtering engine.
//!
//! This crate turns raw exam-submission records into canonical records,
//! summary statistics, chart-ready series and filtered/sorted views. Every
//! function here is pure: the same input always yields the same output.

pub mod error;
pub mod filter;
pub mod grade;
pub mod model;
pub mod normalize;
pub mod report;
pub mod series;
pub mod statistics;
pub mod toggle;
pub mod traits;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{RecordWarning, WarningKind};
pub use filter::{
    apply_filters, apply_view, sort_records, DateRange, FilterParseError, FilterSpec,
    FilteredView, ScoreRange, SortDirection, SortKey, SortSpec, StatusFilter,
};
pub use grade::{PerformanceBand, ResultLabel};
pub use model::{
    ExamWindow, RawExamWindow, RawSubmission, Status, SubmissionRecord, UNKNOWN_LABEL,
};
pub use normalize::{
    check_invariants, normalize, normalize_exam_windows, normalize_values, parse_exam_windows,
    parse_submissions, NormalizeOptions, Normalized,
};
pub use report::{Dashboard, ScoreDistribution, SeriesScope};
pub use series::{
    build_distribution, build_exam_scores, build_pass_fail_split, build_time_series, score_band,
    ExamScores, PassFailSplit, TimeSeries, SCORE_BAND_LABELS,
};
pub use statistics::{compute_statistics, Statistics};
pub use toggle::SortToggle;
pub use traits::RecordSource;
