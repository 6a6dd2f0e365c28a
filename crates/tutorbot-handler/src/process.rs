//! Subprocess-per-call handler execution.
//!
//! Each invocation spawns the configured program, writes one JSON request
//! (`{"input": ..., "state": ...}`) to its stdin, closes stdin, and collects
//! stdout. A fresh process per call means the student's current file is
//! always what runs, and nothing the handler keeps in memory survives into
//! the next call.
//!
//! Exit status [`LOAD_FAILURE_EXIT_CODE`] is reserved: a program wrapping
//! interpreted student code exits with it when that code cannot be loaded
//! (a syntax error, a missing module), and the failure is reported as a load
//! failure rather than a runtime fault. Any other non-zero exit is a fault.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;
use tutorbot_types::UserState;

use crate::error::{HandlerFault, InvocationError, LoadError};

/// Exit status reserved for "the student code could not be loaded".
///
/// Matches `EX_CONFIG` from `sysexits.h`.
pub const LOAD_FAILURE_EXIT_CODE: i32 = 78;

/// Maximum number of characters of stderr kept in a fault.
const MAX_STDERR_LEN: usize = 2000;

/// The request document written to the handler's stdin.
#[derive(Debug, Serialize)]
pub struct HandlerRequest<'a> {
    /// The payload text.
    pub input: &'a str,
    /// The caller's current state.
    pub state: &'a UserState,
}

/// A resolved external handler program.
#[derive(Debug, Clone)]
pub struct ProcessHandler {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessHandler {
    /// Create a handler for an already-resolved program path.
    pub const fn new(program: PathBuf, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program,
            args,
            timeout,
        }
    }

    /// Run the program once and return its stdout.
    ///
    /// The child is killed if the timeout elapses.
    pub async fn call(&self, input: &str, state: &UserState) -> Result<String, InvocationError> {
        let request = serde_json::to_vec(&HandlerRequest { input, state })
            .map_err(|e| HandlerFault::Io(std::io::Error::other(e)))?;

        match tokio::time::timeout(self.timeout, self.run(&request)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(HandlerFault::TimedOut(self.timeout.as_millis()).into()),
        }
    }

    async fn run(&self, request: &[u8]) -> Result<String, InvocationError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(HandlerFault::Io)?;

        if let Some(mut stdin) = child.stdin.take() {
            // A handler that exits without reading its input is not a fault
            // by itself; its exit status decides.
            if let Err(e) = stdin.write_all(request).await
                && e.kind() != std::io::ErrorKind::BrokenPipe
            {
                return Err(HandlerFault::Io(e).into());
            }
        }

        let output = child.wait_with_output().await.map_err(HandlerFault::Io)?;
        let stderr = tail(&String::from_utf8_lossy(&output.stderr));

        if output.status.code() == Some(LOAD_FAILURE_EXIT_CODE) {
            return Err(LoadError::Rejected { stderr }.into());
        }

        if !output.status.success() {
            return Err(HandlerFault::Exited {
                status: output.status.to_string(),
                stderr,
            }
            .into());
        }

        if !stderr.is_empty() {
            debug!(program = %self.program.display(), stderr = stderr, "handler wrote to stderr");
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Keep the last [`MAX_STDERR_LEN`] characters of trimmed stderr.
fn tail(stderr: &str) -> String {
    let trimmed = stderr.trim();
    let count = trimmed.chars().count();
    trimmed
        .chars()
        .skip(count.saturating_sub(MAX_STDERR_LEN))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_end_of_long_stderr() {
        let long = format!("{}END", "x".repeat(MAX_STDERR_LEN));
        let kept = tail(&long);
        assert_eq!(kept.chars().count(), MAX_STDERR_LEN);
        assert!(kept.ends_with("END"));
    }

    #[test]
    fn tail_trims_short_stderr() {
        assert_eq!(tail("  boom\n"), "boom");
    }

    #[test]
    fn request_serializes_input_and_state() {
        let state = UserState::from(serde_json::json!({"messages": ["a"]}));
        let body = serde_json::to_value(HandlerRequest {
            input: "show",
            state: &state,
        })
        .unwrap_or_default();
        assert_eq!(
            body,
            serde_json::json!({"input": "show", "state": {"messages": ["a"]}})
        );
    }
}
