//! Fixture discovery and replay.
//!
//! Every test case reloads the handler and starts from its own copy of the
//! level's `setup_state`, so a case observes the handler exactly as it is on
//! disk and nothing leaks between cases.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use tutorbot_handler::HandlerLoader;
use tutorbot_types::{LevelFixture, TestCase, UserState};

use crate::error::GraderError;
use crate::report::{CaseReport, LevelReport, Verdict};

/// File extension of fixture files.
pub const FIXTURE_EXTENSION: &str = "json";

/// Replays level fixtures against a handler.
#[derive(Debug, Clone)]
pub struct Grader {
    loader: HandlerLoader,
    levels_dir: PathBuf,
}

impl Grader {
    /// Create a grader for fixtures under `levels_dir`.
    pub fn new(loader: HandlerLoader, levels_dir: impl Into<PathBuf>) -> Self {
        Self {
            loader,
            levels_dir: levels_dir.into(),
        }
    }

    /// Names of all fixture files in the levels directory, sorted.
    pub fn discover(&self) -> Result<Vec<String>, GraderError> {
        let io_err = |source: std::io::Error| GraderError::Io {
            path: self.levels_dir.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.levels_dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let is_fixture = path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(FIXTURE_EXTENSION));
            if is_fixture && let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_owned());
            }
        }
        names.sort();
        debug!(count = names.len(), dir = %self.levels_dir.display(), "fixtures discovered");
        Ok(names)
    }

    /// Resolve a fixture name against the levels directory.
    ///
    /// Absolute paths are used as given.
    pub fn fixture_path(&self, name: &str) -> PathBuf {
        self.levels_dir.join(name)
    }

    /// Load and grade one fixture file.
    pub async fn run_level(&self, name: &str) -> Result<LevelReport, GraderError> {
        let path = self.fixture_path(name);
        let fixture = load_fixture(&path)?;
        let fallback = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(name)
            .to_owned();
        Ok(self.grade(&fixture, &fallback).await)
    }

    /// Grade an already-parsed fixture.
    pub async fn grade(&self, fixture: &LevelFixture, fallback_title: &str) -> LevelReport {
        let title = fixture.display_title(fallback_title).to_owned();
        let mut cases = Vec::with_capacity(fixture.tests.len());
        for case in &fixture.tests {
            cases.push(self.run_case(case, &fixture.setup_state).await);
        }
        let report = LevelReport { title, cases };
        info!(level = report.title, passed = report.passed(), "level graded");
        report
    }

    /// Grade one case from a fresh copy of `setup_state`.
    pub async fn run_case(&self, case: &TestCase, setup_state: &UserState) -> CaseReport {
        let state = setup_state.clone();
        let (output, verdict) = match self.loader.invoke(&case.input, &state).await {
            Ok(result) => {
                let verdict = if result.output.contains(&case.expected_output_contains) {
                    Verdict::Passed
                } else {
                    Verdict::Failed
                };
                (result.output, verdict)
            }
            Err(e) => (String::new(), Verdict::Errored(e.to_string())),
        };

        CaseReport {
            input: case.input.clone(),
            output,
            expected: case.expected_output_contains.clone(),
            verdict,
        }
    }
}

/// Read and parse a fixture file.
pub fn load_fixture(path: &Path) -> Result<LevelFixture, GraderError> {
    let contents = std::fs::read_to_string(path).map_err(|source| GraderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| GraderError::Fixture {
        path: path.to_path_buf(),
        source,
    })
}
