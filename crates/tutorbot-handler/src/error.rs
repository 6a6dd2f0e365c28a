//! Error types for handler invocation.
//!
//! Each failure tier has its own type so callers can report them with
//! distinct wording:
//!
//! 1. [`LoadError`] -- the handler could not be (re)loaded at all
//! 2. [`HandlerFault`] -- the handler was called and failed while running
//! 3. [`ContractViolation`] -- the handler returned, but not a valid result
//!
//! [`InvocationError`] wraps all three for the shared invocation path.

/// The handler source could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The handler source string was empty or named an unknown built-in.
    #[error("invalid handler source: {0}")]
    InvalidSource(String),

    /// The handler program could not be found or is not executable.
    #[error("handler program `{program}` not found: {source}")]
    ProgramNotFound {
        /// The program as configured.
        program: String,
        /// The lookup failure.
        source: which::Error,
    },

    /// The handler program reported that the student code it wraps could
    /// not be loaded, by exiting with [`LOAD_FAILURE_EXIT_CODE`].
    ///
    /// [`LOAD_FAILURE_EXIT_CODE`]: crate::process::LOAD_FAILURE_EXIT_CODE
    #[error("handler failed to load: {stderr}")]
    Rejected {
        /// Trimmed tail of the handler's stderr.
        stderr: String,
    },
}

/// The handler failed while running.
#[derive(Debug, thiserror::Error)]
pub enum HandlerFault {
    /// The handler process could not be started or talked to.
    #[error("failed to run handler: {0}")]
    Io(#[from] std::io::Error),

    /// The handler process exited unsuccessfully.
    #[error("handler exited with {status}: {stderr}")]
    Exited {
        /// Exit status description (code or signal).
        status: String,
        /// Trimmed tail of the handler's stderr.
        stderr: String,
    },

    /// The handler did not finish within the invocation timeout.
    #[error("handler timed out after {0} ms")]
    TimedOut(u128),
}

/// The handler returned something that is not a well-formed result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    /// The handler's stdout was not a JSON document.
    #[error("result is not valid JSON: {0}")]
    MalformedJson(String),

    /// The result was JSON but not an object.
    #[error("result is not a JSON object")]
    NotAnObject,

    /// The result object has no `output` key.
    #[error("result has no \"output\" key")]
    MissingOutput,

    /// The `output` key is not a string.
    #[error("\"output\" must be a string")]
    OutputNotString,
}

/// Any failure of a single handler invocation, tagged by tier.
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    /// Tier 1: reload failed; the handler was never called.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Tier 2: the handler was called and faulted.
    #[error(transparent)]
    Fault(#[from] HandlerFault),

    /// Tier 3: the handler returned a malformed result.
    #[error(transparent)]
    Contract(#[from] ContractViolation),
}
