//! Integration tests running the grader against fixture files on disk.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use tutorbot_grader::{Grader, GraderError, Verdict};
use tutorbot_handler::{DEFAULT_TIMEOUT, HandlerLoader, HandlerSource};

fn shipped_levels() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../levels")
}

fn grader(source: &str, dir: impl Into<PathBuf>) -> Grader {
    Grader::new(
        HandlerLoader::new(source.parse::<HandlerSource>().unwrap(), DEFAULT_TIMEOUT),
        dir,
    )
}

#[tokio::test]
async fn starter_passes_every_shipped_level() {
    let grader = grader("builtin:starter", shipped_levels());
    let names = grader.discover().unwrap();
    assert_eq!(
        names,
        vec!["level1_show.json", "level2_add.json", "level3_clear.json"]
    );

    for name in &names {
        let report = grader.run_level(name).await.unwrap();
        assert!(report.passed(), "{name} failed:\n{report}");
    }
}

#[tokio::test]
async fn lesson_handler_passes_lesson_levels() {
    let grader = grader("builtin:lesson", shipped_levels().join("lesson"));
    let report = grader.run_level("level1_ping.json").await.unwrap();
    assert!(report.passed(), "{report}");
    assert_eq!(report.title, "Lesson 1: Commands and ping");
}

#[tokio::test]
async fn starter_fails_lesson_levels() {
    let grader = grader("builtin:starter", shipped_levels().join("lesson"));
    let report = grader.run_level("level1_ping.json").await.unwrap();
    assert!(!report.passed());
    assert!(report.to_string().ends_with("LEVEL FAILED"));
}

#[tokio::test]
async fn explicit_fixture_paths_and_fallback_titles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("untitled.json");
    std::fs::write(
        &path,
        r#"{"tests": [{"input": "add hello", "expected_output_contains": "hello"},
                      {"input": "show", "expected_output_contains": "nothing like this"}]}"#,
    )
    .unwrap();

    // Absolute paths bypass the levels directory.
    let grader = grader("builtin:starter", "/nonexistent");
    let report = grader.run_level(path.to_str().unwrap()).await.unwrap();
    assert_eq!(report.title, "untitled.json");
    assert_eq!(
        report.cases.iter().map(|c| c.verdict.clone()).collect::<Vec<_>>(),
        vec![Verdict::Passed, Verdict::Failed]
    );
    assert!(!report.passed());
}

#[tokio::test]
async fn missing_fixture_is_an_io_error() {
    let grader = grader("builtin:starter", shipped_levels());
    let result = grader.run_level("level99.json").await;
    assert!(matches!(result, Err(GraderError::Io { .. })));
}

#[cfg(unix)]
#[tokio::test]
async fn subprocess_handler_is_reloaded_per_case() {
    let dir = tempfile::tempdir().unwrap();
    // Every run appends a line, so one line per case means one process per case.
    let script = dir.path().join("counter.sh");
    std::fs::write(
        &script,
        "cat > /dev/null\necho x >> \"$(dirname \"$0\")/calls\"\nn=$(wc -l < \"$(dirname \"$0\")/calls\")\necho \"{\\\"output\\\": \\\"call $n\\\"}\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("level.json"),
        r#"{"tests": [{"input": "a", "expected_output_contains": "call"},
                      {"input": "b", "expected_output_contains": "call"}]}"#,
    )
    .unwrap();

    let grader = grader(&format!("sh {}", script.display()), dir.path());
    let report = grader.run_level("level.json").await.unwrap();
    assert!(report.passed(), "{report}");
    let calls = std::fs::read_to_string(dir.path().join("calls")).unwrap();
    assert_eq!(calls.lines().count(), 2);
}
