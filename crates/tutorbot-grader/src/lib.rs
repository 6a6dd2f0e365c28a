//! Offline grading of student handlers.
//!
//! Replays the inputs of level fixtures against a handler and checks that
//! each output contains the expected substring. No chat transport is
//! involved; the handler is invoked through the same contract the bot uses.
//!
//! - [`harness`] -- fixture discovery and replay
//! - [`report`] -- per-case and per-level results
//! - [`error`] -- fixture and directory failures

pub mod error;
pub mod harness;
pub mod report;

pub use error::GraderError;
pub use harness::{Grader, load_fixture};
pub use report::{CaseReport, LevelReport, Summary, Verdict};
