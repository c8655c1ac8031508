//! Dashboard snapshot with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::SubmissionRecord;
use crate::series::{
    build_distribution, build_exam_scores, build_pass_fail_split, build_time_series, ExamScores,
    PassFailSplit, TimeSeries, SCORE_BAND_LABELS,
};
use crate::statistics::{compute_statistics, Statistics};

/// Which records feed the time and per-exam series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesScope {
    /// Completed records only (student view).
    Completed,
    /// Every record (administrator view).
    #[default]
    All,
}

/// Score histogram with its band labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
}

impl ScoreDistribution {
    fn from_records(records: &[SubmissionRecord]) -> Self {
        Self {
            labels: SCORE_BAND_LABELS.iter().map(|l| l.to_string()).collect(),
            counts: build_distribution(records).to_vec(),
        }
    }
}

/// Everything the results dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub scope: SeriesScope,
    pub record_count: usize,
    pub statistics: Statistics,
    pub distribution: ScoreDistribution,
    pub time_series: TimeSeries,
    pub pass_fail: PassFailSplit,
    pub exam_scores: ExamScores,
}

impl Dashboard {
    /// Build a dashboard. Statistics, distribution and the pass/fail split
    /// always cover every record; `scope` only narrows the two series.
    pub fn build(
        records: &[SubmissionRecord],
        generated_at: DateTime<Utc>,
        scope: SeriesScope,
    ) -> Self {
        let series_records: Vec<SubmissionRecord> = match scope {
            SeriesScope::All => records.to_vec(),
            SeriesScope::Completed => records
                .iter()
                .filter(|r| r.is_completed())
                .cloned()
                .collect(),
        };

        Dashboard {
            generated_at,
            scope,
            record_count: records.len(),
            statistics: compute_statistics(records),
            distribution: ScoreDistribution::from_records(records),
            time_series: build_time_series(&series_records),
            pass_fail: build_pass_fail_split(records),
            exam_scores: build_exam_scores(&series_records),
        }
    }

    /// Save the dashboard as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize dashboard")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write dashboard to {}", path.display()))?;
        Ok(())
    }

    /// Load a dashboard from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dashboard from {}", path.display()))?;
        let dashboard: Dashboard =
            serde_json::from_str(&content).context("failed to parse dashboard JSON")?;
        Ok(dashboard)
    }
}
