//! Error types for the chat front end.
//!
//! Handler failures are not errors here: they become replies. These are the
//! failures of the front end itself (config, transport, persistence).

/// Errors that can occur while running the front end.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// Failed to connect to or communicate with the NATS server.
    #[error("NATS error: {0}")]
    Nats(String),

    /// Reading from or writing to the console failed.
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisting a user's state failed.
    #[error(transparent)]
    Store(#[from] tutorbot_store::StoreError),
}
