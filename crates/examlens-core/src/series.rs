//! Chart series: score distribution, score over time, pass/fail split.

use serde::{Deserialize, Serialize};

use crate::model::SubmissionRecord;

/// Labels for the five score bands, in band order.
pub const SCORE_BAND_LABELS: [&str; 5] = ["0-20%", "21-40%", "41-60%", "61-80%", "81-100%"];

/// Upper (inclusive) bound of each band except the last.
const BAND_UPPER: [f64; 4] = [20.0, 40.0, 60.0, 80.0];

/// Band index for a score. Boundaries belong to the lower band; scores
/// outside 0..=100 land in the first or last band.
pub fn score_band(score: f64) -> usize {
    BAND_UPPER
        .iter()
        .position(|&upper| score <= upper)
        .unwrap_or(BAND_UPPER.len())
}

/// Count records per score band. Every record counts once, whatever its status.
pub fn build_distribution(records: &[SubmissionRecord]) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for record in records {
        counts[score_band(record.score)] += 1;
    }
    counts
}

/// Scores ordered by submission time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Milliseconds since the Unix epoch.
    pub timestamps: Vec<i64>,
    pub scores: Vec<f64>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Ascending by timestamp; records with equal timestamps keep input order.
pub fn build_time_series(records: &[SubmissionRecord]) -> TimeSeries {
    let mut ordered: Vec<&SubmissionRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.timestamp);

    let (timestamps, scores) = ordered
        .into_iter()
        .map(|r| (r.timestamp.timestamp_millis(), r.score))
        .unzip();
    TimeSeries { timestamps, scores }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassFailSplit {
    pub passed: usize,
    pub failed: usize,
}

impl PassFailSplit {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

pub fn build_pass_fail_split(records: &[SubmissionRecord]) -> PassFailSplit {
    let passed = records.iter().filter(|r| r.is_completed()).count();
    PassFailSplit {
        passed,
        failed: records.len() - passed,
    }
}

/// One bar per record: exam title and score, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExamScores {
    pub titles: Vec<String>,
    pub scores: Vec<f64>,
}

pub fn build_exam_scores(records: &[SubmissionRecord]) -> ExamScores {
    let (titles, scores) = records
        .iter()
        .map(|r| (r.exam_title.clone(), r.score))
        .unzip();
    ExamScores { titles, scores }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{at, placeholder, record, scored};

    #[test]
    fn band_boundaries_go_to_lower_band() {
        assert_eq!(score_band(0.0), 0);
        assert_eq!(score_band(20.0), 0);
        assert_eq!(score_band(20.5), 1);
        assert_eq!(score_band(40.0), 1);
        assert_eq!(score_band(60.0), 2);
        assert_eq!(score_band(80.0), 3);
        assert_eq!(score_band(80.1), 4);
        assert_eq!(score_band(100.0), 4);
    }

    #[test]
    fn out_of_range_scores_are_clamped_into_end_bands() {
        assert_eq!(score_band(-5.0), 0);
        assert_eq!(score_band(130.0), 4);
    }

    #[test]
    fn distribution_of_three_scores() {
        let dist = build_distribution(&scored(&[50.0, 95.0, 70.0]));
        assert_eq!(dist, [0, 0, 1, 1, 1]);
    }

    #[test]
    fn distribution_counts_failed_records() {
        let records = vec![placeholder("e1"), record("a", 15.0, false), record("b", 99.0, true)];
        let dist = build_distribution(&records);
        assert_eq!(dist, [2, 0, 0, 0, 1]);
        assert_eq!(dist.iter().sum::<usize>(), records.len());
    }

    #[test]
    fn time_series_sorted_and_stable() {
        let mut late = record("late", 90.0, true);
        late.timestamp = at(5);
        let mut early = record("early", 40.0, false);
        early.timestamp = at(2);
        let mut tie_a = record("tie-a", 70.0, true);
        tie_a.timestamp = at(3);
        let mut tie_b = record("tie-b", 71.0, true);
        tie_b.timestamp = at(3);

        let series = build_time_series(&[late, tie_a, early, tie_b]);
        assert_eq!(series.scores, vec![40.0, 70.0, 71.0, 90.0]);
        assert_eq!(series.timestamps[0], at(2).timestamp_millis());
        assert!(series.timestamps.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn empty_series() {
        assert!(build_time_series(&[]).is_empty());
        assert_eq!(build_pass_fail_split(&[]), PassFailSplit::default());
        assert_eq!(build_exam_scores(&[]), ExamScores::default());
    }

    #[test]
    fn pass_fail_split_with_placeholder() {
        let split = build_pass_fail_split(&[placeholder("e1"), record("a", 88.0, true)]);
        assert_eq!(split, PassFailSplit { passed: 1, failed: 1 });
        assert_eq!(split.total(), 2);
    }

    #[test]
    fn exam_scores_keep_input_order() {
        let mut a = record("a", 55.0, false);
        a.exam_title = "Physics".into();
        let b = record("b", 82.0, true);

        let bars = build_exam_scores(&[a, b]);
        assert_eq!(bars.titles, vec!["Physics", "Algebra"]);
        assert_eq!(bars.scores, vec![55.0, 82.0]);
    }
}
