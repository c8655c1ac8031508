//! The `examlens init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing("examlens.toml", SAMPLE_CONFIG)?;
    write_if_missing("db.json", SAMPLE_DB)?;

    println!("\nNext steps:");
    println!("  1. Point `source` in examlens.toml at your db.json");
    println!("  2. Run: examlens validate");
    println!("  3. Run: examlens summary");

    Ok(())
}

fn write_if_missing(name: &str, content: &str) -> Result<()> {
    if Path::new(name).exists() {
        println!("{name} already exists, skipping.");
    } else {
        std::fs::write(name, content)?;
        println!("Created {name}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examlens configuration

source = "db.json"
# exams = "exams.json"

# Student scope; leave unset for the administrator view.
# viewer_user_id = "${EXAMLENS_VIEWER}"

unknown_label = "Unknown"
output_dir = "./examlens-out"

[export]
columns = ["student_name", "exam_title", "score", "percentage", "status", "date"]
"#;

const SAMPLE_DB: &str = r#"{
  "exams": [
    {
      "id": "1",
      "title": "Algebra Basics",
      "passingMarks": 60,
      "startTime": "2024-03-01T09:00",
      "endTime": "2024-03-08T18:00"
    },
    {
      "id": "2",
      "title": "World History",
      "passingMarks": 50,
      "startTime": "2024-03-10T09:00",
      "endTime": "2024-03-17T18:00"
    }
  ],
  "results": [
    {
      "id": "101",
      "examId": "1",
      "userId": "2",
      "studentName": "Ada Lovelace",
      "examTitle": "Algebra Basics",
      "score": 90,
      "totalQuestions": 10,
      "correctAnswers": 9,
      "wrongAnswers": 1,
      "unansweredQuestions": 0,
      "passed": true,
      "passingMarks": 60,
      "timeTaken": 540,
      "timestamp": "2024-03-02T10:15:00.000Z"
    },
    {
      "id": "102",
      "examId": "1",
      "userId": "3",
      "studentName": "Grace Hopper",
      "examTitle": "Algebra Basics",
      "score": 50,
      "totalQuestions": 10,
      "correctAnswers": 5,
      "wrongAnswers": 4,
      "unansweredQuestions": 1,
      "passed": false,
      "passingMarks": 60,
      "timeTaken": 780,
      "timestamp": "2024-03-03T14:40:00.000Z"
    },
    {
      "id": "103",
      "examId": "2",
      "userId": "3",
      "studentName": "Grace Hopper",
      "examTitle": "World History",
      "score": 70,
      "totalQuestions": 10,
      "correctAnswers": 7,
      "wrongAnswers": 3,
      "unansweredQuestions": 0,
      "passed": true,
      "passingMarks": 50,
      "timeTaken": 610,
      "timestamp": "2024-03-12T08:05:00.000Z"
    }
  ]
}
"#;
