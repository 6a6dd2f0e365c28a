//! Per-call handler reload and the shared invocation path.
//!
//! Callers never hold on to a handler between messages. They go through
//! [`HandlerLoader::invoke`], which reloads the source, runs it once, and
//! validates the result. Each step fails with its own error tier, except
//! that a program may also report a load failure from its exit status.

use std::time::Duration;

use tracing::debug;
use tutorbot_types::{HandlerResult, UserState};

use crate::builtin::BuiltinHandler;
use crate::contract;
use crate::error::{InvocationError, LoadError};
use crate::process::ProcessHandler;
use crate::source::HandlerSource;

/// Default limit on a single handler invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Reloads a [`HandlerSource`] on demand.
#[derive(Debug, Clone)]
pub struct HandlerLoader {
    source: HandlerSource,
    timeout: Duration,
}

/// A freshly loaded handler, ready for one invocation.
///
/// Uses enum dispatch so the invocation stays a plain `async fn`.
#[derive(Debug, Clone)]
pub enum LoadedHandler {
    /// A compiled-in handler.
    Builtin(BuiltinHandler),
    /// An external program.
    Process(ProcessHandler),
}

impl HandlerLoader {
    /// Create a loader for `source` with a per-invocation timeout.
    pub const fn new(source: HandlerSource, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// The configured source.
    pub const fn source(&self) -> &HandlerSource {
        &self.source
    }

    /// Load the handler as it currently exists.
    ///
    /// External programs are looked up again on every call, so a handler
    /// that was deleted or renamed since the last message fails here rather
    /// than at spawn time.
    pub fn load(&self) -> Result<LoadedHandler, LoadError> {
        match &self.source {
            HandlerSource::Builtin(handler) => Ok(LoadedHandler::Builtin(*handler)),
            HandlerSource::Process { program, args } => {
                let resolved =
                    which::which(program).map_err(|source| LoadError::ProgramNotFound {
                        program: program.clone(),
                        source,
                    })?;
                debug!(program = %resolved.display(), "handler program resolved");
                Ok(LoadedHandler::Process(ProcessHandler::new(
                    resolved,
                    args.clone(),
                    self.timeout,
                )))
            }
        }
    }

    /// Reload the handler, run it once, and validate the result.
    pub async fn invoke(
        &self,
        input: &str,
        state: &UserState,
    ) -> Result<HandlerResult, InvocationError> {
        let handler = self.load()?;
        handler.invoke(input, state).await
    }
}

impl LoadedHandler {
    /// Run the handler once and validate what it returned.
    pub async fn invoke(
        &self,
        input: &str,
        state: &UserState,
    ) -> Result<HandlerResult, InvocationError> {
        match self {
            Self::Builtin(handler) => Ok(contract::validate(handler.call(input, state), state)?),
            Self::Process(handler) => {
                let stdout = handler.call(input, state).await?;
                Ok(contract::validate_stdout(&stdout, state)?)
            }
        }
    }
}
