//! Level fixtures for offline grading.
//!
//! One fixture file describes one graded level: an initial state and a list
//! of inputs with a substring the output must contain. Test cases within a
//! level share nothing; each starts from its own copy of `setup_state`.

use serde::{Deserialize, Serialize};

use crate::state::UserState;

/// A graded level loaded from a fixture file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFixture {
    /// Human-readable level title. Falls back to the file name when absent.
    #[serde(default)]
    pub title: Option<String>,
    /// State every test case starts from.
    #[serde(default)]
    pub setup_state: UserState,
    /// The test cases of this level.
    #[serde(default)]
    pub tests: Vec<TestCase>,
}

impl LevelFixture {
    /// The level title, or `fallback` (usually the file name) if untitled.
    pub fn display_title<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }
}

/// A single input and the substring its output must contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Input text passed to the handler.
    pub input: String,
    /// Substring the handler output must contain for the case to pass.
    pub expected_output_contains: String,
}
