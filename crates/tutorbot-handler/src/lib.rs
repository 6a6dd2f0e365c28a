//! The student handler contract.
//!
//! A handler maps `(input, state)` to `{output, state}`. This crate owns
//! everything between a caller and a handler:
//!
//! - [`source`] -- configured handler sources (`builtin:<name>` or a command)
//! - [`loader`] -- per-call reload and the shared invocation path
//! - [`process`] -- subprocess-per-call execution with a timeout
//! - [`contract`] -- validation of raw results into [`HandlerResult`]
//! - [`builtin`] -- compiled-in starter handlers
//! - [`error`] -- one error type per failure tier
//!
//! [`HandlerResult`]: tutorbot_types::HandlerResult

pub mod builtin;
pub mod contract;
pub mod error;
pub mod loader;
pub mod process;
pub mod source;

pub use builtin::BuiltinHandler;
pub use error::{ContractViolation, HandlerFault, InvocationError, LoadError};
pub use loader::{DEFAULT_TIMEOUT, HandlerLoader, LoadedHandler};
pub use process::LOAD_FAILURE_EXIT_CODE;
pub use source::HandlerSource;
