//! Subcommands and the loading steps they share.

pub mod export;
pub mod init;
pub mod list;
pub mod summary;
pub mod validate;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use examlens_core::model::parse_timestamp;
use examlens_core::traits::RecordSource;
use examlens_core::{
    normalize_values, DateRange, FilterSpec, NormalizeOptions, Normalized, ScoreRange,
    SortDirection, SortKey, SortSpec, StatusFilter,
};
use examlens_source::{load_config_from, ExamlensConfig, JsonFileSource};

use crate::{SourceArgs, ViewArgs};

/// Records loaded and normalized for one command invocation.
pub struct Loaded {
    pub config: ExamlensConfig,
    pub source_name: String,
    pub submission_count: usize,
    pub exam_count: usize,
    pub viewer: Option<String>,
    /// Reference time: `--now`, else the wall clock.
    pub now: DateTime<Utc>,
    pub normalized: Normalized,
}

/// Resolve flags against the config, fetch from the source and normalize.
pub fn load(args: &SourceArgs) -> Result<Loaded> {
    let config = load_config_from(args.config.as_deref())?;

    let path = args
        .source
        .clone()
        .or_else(|| config.source.clone())
        .context("no source given; pass --source or set `source` in examlens.toml")?;
    let mut source = JsonFileSource::new(path);
    if let Some(exams) = args.exams.clone().or_else(|| config.exams.clone()) {
        source = source.with_exams(exams);
    }

    let viewer = args
        .viewer
        .clone()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| config.viewer_user_id.clone());
    let now = match &args.now {
        Some(raw) => parse_date(raw, false)?,
        None => Utc::now(),
    };

    let submissions = source.fetch_submissions()?;
    let exams = source.fetch_exam_windows()?;

    let mut options = NormalizeOptions::new(now).with_unknown_label(config.unknown_label.clone());
    if let Some(viewer) = &viewer {
        options = options.with_viewer(viewer.clone());
    }
    let mut normalized = normalize_values(&submissions, &exams, &options);

    // Student scope: only the viewer's own results, placeholders included.
    if let Some(viewer) = &viewer {
        normalized.records.retain(|r| &r.user_id == viewer);
    }

    tracing::info!(
        source = source.name(),
        records = normalized.records.len(),
        warnings = normalized.warnings.len(),
        "loaded results"
    );

    Ok(Loaded {
        source_name: source.name().to_string(),
        submission_count: submissions.len(),
        exam_count: exams.len(),
        config,
        viewer,
        now,
        normalized,
    })
}

/// Parse a date flag: RFC 3339, a naive date-time, or `YYYY-MM-DD`. With
/// `end_of_day`, a bare date means the last millisecond of that day.
pub fn parse_date(raw: &str, end_of_day: bool) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if end_of_day {
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
                .context("invalid end-of-day time")?;
            return Ok(date.and_time(last).and_utc());
        }
    }
    parse_timestamp(raw)
        .with_context(|| format!("invalid date `{raw}`, expected RFC 3339 or YYYY-MM-DD"))
}

/// Build the filter and sort values from the view flags.
pub fn view_spec(args: &ViewArgs) -> Result<(FilterSpec, SortSpec)> {
    let status = match &args.status {
        Some(s) => s.parse::<StatusFilter>()?,
        None => StatusFilter::Any,
    };
    let score_range = args
        .score_range
        .as_deref()
        .map(str::parse::<ScoreRange>)
        .transpose()?;
    let date_range = DateRange {
        start: args.from.as_deref().map(|d| parse_date(d, false)).transpose()?,
        end: args.to.as_deref().map(|d| parse_date(d, true)).transpose()?,
    };

    let filter = FilterSpec {
        search_term: args.search.clone().unwrap_or_default(),
        exam_id: args.exam.clone().unwrap_or_default(),
        status,
        score_range,
        date_range,
    };
    let direction = if args.desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    let sort = SortSpec::new(args.sort.parse::<SortKey>()?, direction);

    Ok((filter, sort))
}

/// One-line hint after a command when the normalizer reported problems.
pub fn warn_summary(normalized: &Normalized) {
    if !normalized.warnings.is_empty() {
        eprintln!(
            "{} warning(s) while normalizing; run `examlens validate` for details.",
            normalized.warnings.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bare_to_date_covers_whole_day() {
        let end = parse_date("2024-03-05", true).unwrap();
        let last_second = Utc.with_ymd_and_hms(2024, 3, 5, 23, 59, 59).unwrap();
        assert_eq!(end, last_second + chrono::Duration::milliseconds(999));
        let start = parse_date("2024-03-05", false).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn full_timestamps_are_kept() {
        let at = parse_date("2024-03-05T10:15:00Z", true).unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 3, 5, 10, 15, 0).unwrap());
        assert!(parse_date("yesterday", false).is_err());
    }

    #[test]
    fn view_flags_build_specs() {
        let args = ViewArgs {
            search: Some("ada".into()),
            status: Some("passed".into()),
            score_range: Some("60-100".into()),
            sort: "score".into(),
            desc: true,
            ..ViewArgs::default()
        };
        let (filter, sort) = view_spec(&args).unwrap();
        assert_eq!(filter.search_term, "ada");
        assert_eq!(filter.status, StatusFilter::Passed);
        assert_eq!(filter.score_range, Some(ScoreRange::new(60.0, 100.0)));
        assert_eq!(sort, SortSpec::new(SortKey::Score, SortDirection::Desc));
    }

    #[test]
    fn bad_flags_are_errors() {
        let args = ViewArgs {
            score_range: Some("high".into()),
            sort: "none".into(),
            ..ViewArgs::default()
        };
        assert!(view_spec(&args).is_err());

        let args = ViewArgs {
            sort: "date".into(),
            ..ViewArgs::default()
        };
        assert!(view_spec(&args).is_err());
    }
}
