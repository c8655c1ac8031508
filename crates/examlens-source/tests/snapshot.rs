//! End-to-end: db.json on disk through the normalizer.

use chrono::{TimeZone, Utc};
use serde_json::json;

use examlens_core::traits::RecordSource;
use examlens_core::{compute_statistics, normalize_values, NormalizeOptions, Status};
use examlens_source::{JsonFileSource, MemorySource};

fn db() -> serde_json::Value {
    json!({
        "results": [
            {
                "id": "1",
                "examId": 1,
                "userId": 7,
                "studentName": "Ada Lovelace",
                "score": 88,
                "totalQuestions": 10,
                "correctAnswers": 9,
                "wrongAnswers": 1,
                "unansweredQuestions": 0,
                "passed": true,
                "timeTaken": 420,
                "timestamp": "2024-03-02T10:00:00.000Z"
            },
            "garbage"
        ],
        "exams": [
            {"id": 1, "title": "Algebra", "passingMarks": 60, "endTime": "2024-03-05T18:00"},
            {"id": 2, "title": "Physics", "passingMarks": 50, "endTime": "2024-03-06T18:00"}
        ]
    })
}

fn load(source: &dyn RecordSource) -> examlens_core::Normalized {
    let now = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
    let options = NormalizeOptions::new(now).with_viewer("7");
    normalize_values(
        &source.fetch_submissions().unwrap(),
        &source.fetch_exam_windows().unwrap(),
        &options,
    )
}

#[test]
fn file_and_memory_sources_agree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, serde_json::to_string_pretty(&db()).unwrap()).unwrap();

    let from_file = load(&JsonFileSource::new(&path));
    let from_memory = load(&MemorySource::from_db(&db()));
    assert_eq!(from_file, from_memory);
}

#[test]
fn student_snapshot_includes_missed_exam() {
    let normalized = load(&MemorySource::from_db(&db()));

    assert_eq!(normalized.records.len(), 2);
    let real = &normalized.records[0];
    assert_eq!(real.exam_title, "Algebra");
    assert_eq!(real.passing_marks, 60.0);

    let missed = &normalized.records[1];
    assert_eq!(missed.id, "failed-2");
    assert_eq!(missed.status, Status::Failed);
    assert_eq!(missed.student_name, "Ada Lovelace");
    assert!(missed.synthesized);

    // The non-object entry is reported, not kept.
    assert_eq!(normalized.warnings.len(), 1);

    let stats = compute_statistics(&normalized.records);
    assert_eq!(stats.average_score, 88.0);
    assert_eq!(stats.failed_count, 1);
}
