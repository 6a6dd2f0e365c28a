//! Starter handler speaking the subprocess protocol.
//!
//! Reads one `{"input": ..., "state": ...}` document from stdin and writes
//! the starter's `{"output": ..., "state": ...}` result to stdout. Students
//! writing a handler in another language implement the same exchange.
//!
//! A wrapper around interpreted student code should exit with
//! [`LOAD_FAILURE_EXIT_CODE`] when that code cannot be loaded, for example:
//!
//! ```text
//! python3 -m py_compile student.py || exit 78
//! exec python3 student.py
//! ```
//!
//! The starter itself is compiled in and always loads.
//!
//! [`LOAD_FAILURE_EXIT_CODE`]: tutorbot_handler::LOAD_FAILURE_EXIT_CODE

use std::io::{Read, Write};

use serde::Deserialize;
use tutorbot_handler::builtin;
use tutorbot_types::UserState;

/// The request document read from stdin.
#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    input: String,
    #[serde(default)]
    state: UserState,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;

    let request: Request = serde_json::from_str(&raw)?;
    let result = builtin::starter(&request.input, &request.state);

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, &result)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
