//! Display labels derived from a result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::SubmissionRecord;

/// Result label shown in tables and exports.
///
/// | Condition                 | Label     |
/// |---------------------------|-----------|
/// | not passed                | Failed    |
/// | passed and score >= 90    | Excellent |
/// | passed                    | Passed    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultLabel {
    Excellent,
    Passed,
    Failed,
}

impl ResultLabel {
    pub fn of(record: &SubmissionRecord) -> Self {
        match (record.passed, record.score) {
            (false, _) => ResultLabel::Failed,
            (true, s) if s >= 90.0 => ResultLabel::Excellent,
            (true, _) => ResultLabel::Passed,
        }
    }
}

impl fmt::Display for ResultLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultLabel::Excellent => write!(f, "Excellent"),
            ResultLabel::Passed => write!(f, "Passed"),
            ResultLabel::Failed => write!(f, "Failed"),
        }
    }
}

/// Score class used to colour a score.
///
/// | Range   | Band      |
/// |---------|-----------|
/// | >= 90   | excellent |
/// | >= 80   | very-good |
/// | >= 70   | good      |
/// | >= 60   | pass      |
/// | < 60    | fail      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerformanceBand {
    Excellent,
    VeryGood,
    Good,
    Pass,
    Fail,
}

impl PerformanceBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => PerformanceBand::Excellent,
            s if s >= 80.0 => PerformanceBand::VeryGood,
            s if s >= 70.0 => PerformanceBand::Good,
            s if s >= 60.0 => PerformanceBand::Pass,
            _ => PerformanceBand::Fail,
        }
    }
}

impl fmt::Display for PerformanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PerformanceBand::Excellent => "excellent",
            PerformanceBand::VeryGood => "very-good",
            PerformanceBand::Good => "good",
            PerformanceBand::Pass => "pass",
            PerformanceBand::Fail => "fail",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{placeholder, record};

    #[test]
    fn result_label_trusts_passed_flag() {
        assert_eq!(ResultLabel::of(&record("a", 95.0, true)), ResultLabel::Excellent);
        assert_eq!(ResultLabel::of(&record("b", 90.0, true)), ResultLabel::Excellent);
        assert_eq!(ResultLabel::of(&record("c", 89.9, true)), ResultLabel::Passed);
        assert_eq!(ResultLabel::of(&record("d", 95.0, false)), ResultLabel::Failed);
        assert_eq!(ResultLabel::of(&placeholder("e1")), ResultLabel::Failed);
        assert_eq!(ResultLabel::Excellent.to_string(), "Excellent");
    }

    #[test]
    fn performance_band_boundaries() {
        assert_eq!(PerformanceBand::from_score(100.0), PerformanceBand::Excellent);
        assert_eq!(PerformanceBand::from_score(90.0), PerformanceBand::Excellent);
        assert_eq!(PerformanceBand::from_score(89.0), PerformanceBand::VeryGood);
        assert_eq!(PerformanceBand::from_score(80.0), PerformanceBand::VeryGood);
        assert_eq!(PerformanceBand::from_score(79.0), PerformanceBand::Good);
        assert_eq!(PerformanceBand::from_score(70.0), PerformanceBand::Good);
        assert_eq!(PerformanceBand::from_score(69.0), PerformanceBand::Pass);
        assert_eq!(PerformanceBand::from_score(60.0), PerformanceBand::Pass);
        assert_eq!(PerformanceBand::from_score(59.9), PerformanceBand::Fail);
        assert_eq!(PerformanceBand::from_score(0.0), PerformanceBand::Fail);
        assert_eq!(PerformanceBand::VeryGood.to_string(), "very-good");
    }
}
