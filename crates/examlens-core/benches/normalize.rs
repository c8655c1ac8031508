use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use examlens_core::{normalize_values, NormalizeOptions};

fn submissions(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "id": i,
                "examId": format!("{}", i % 20),
                "userId": if i % 3 == 0 { "viewer".to_string() } else { format!("u{i}") },
                "studentName": "Ada Lovelace",
                "score": (i % 101) as f64,
                "totalQuestions": 10,
                "correctAnswers": "7",
                "wrongAnswers": 2,
                "unansweredQuestions": 1,
                "passed": i % 2 == 0,
                "timeTaken": 600,
                "timestamp": "2024-03-01T09:00:00.000Z",
            })
        })
        .collect()
}

fn exams(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "id": i,
                "title": format!("Exam {i}"),
                "passingMarks": 60,
                "startTime": "2024-02-01T09:00",
                "endTime": "2024-02-28T18:00",
            })
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let exams = exams(40);

    let admin = NormalizeOptions::new(now);
    let student = NormalizeOptions::new(now).with_viewer("viewer");

    for n in [100, 5_000] {
        let raw = submissions(n);
        group.bench_function(format!("admin n={n}"), |b| {
            b.iter(|| normalize_values(black_box(&raw), black_box(&exams), &admin))
        });
        group.bench_function(format!("student n={n}"), |b| {
            b.iter(|| normalize_values(black_box(&raw), black_box(&exams), &student))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
