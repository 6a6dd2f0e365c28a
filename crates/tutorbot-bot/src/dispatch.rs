//! Message dispatch: one inbound message to at most one handler invocation.
//!
//! The pipeline for a message:
//! 1. Drop messages from the bot itself
//! 2. Drop messages that do not start with the trigger token
//! 3. Reload the handler
//! 4. Look up the author's state
//! 5. Invoke the handler and validate its result
//! 6. Persist the returned state, then reply with the output
//!
//! Any handler failure aborts before step 6 and leaves state untouched.

use std::sync::Arc;

use tracing::{debug, info, warn};
use tutorbot_handler::{HandlerLoader, InvocationError};
use tutorbot_store::StateStore;
use tutorbot_types::{InboundMessage, UserId};

use crate::error::BotError;

/// What became of one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not addressed to the bot; nothing is sent.
    Ignored,
    /// The handler succeeded and its state was saved.
    Replied(String),
    /// The handler could not be loaded.
    LoadFailed(String),
    /// The handler faulted while running.
    Faulted(String),
    /// The handler returned a malformed result.
    ContractViolated(String),
}

impl Outcome {
    /// The text to send back to the channel, if any.
    pub fn reply(&self) -> Option<String> {
        match self {
            Self::Ignored => None,
            Self::Replied(output) => Some(output.clone()),
            Self::LoadFailed(e) => Some(format!("Bot error loading student code: {e}")),
            Self::Faulted(e) => Some(format!("Error in student code: {e}")),
            Self::ContractViolated(e) => Some(format!(
                "Student code must return a JSON object with an \"output\" string ({e})"
            )),
        }
    }
}

/// Bridges inbound chat messages to handler invocations.
#[derive(Debug)]
pub struct Dispatcher {
    bot_id: UserId,
    trigger: String,
    loader: HandlerLoader,
    store: Arc<StateStore>,
}

impl Dispatcher {
    /// Create a dispatcher.
    pub const fn new(
        bot_id: UserId,
        trigger: String,
        loader: HandlerLoader,
        store: Arc<StateStore>,
    ) -> Self {
        Self {
            bot_id,
            trigger,
            loader,
            store,
        }
    }

    /// Extract the payload if `message` is a command for this bot.
    pub fn payload<'a>(&self, message: &'a InboundMessage) -> Option<&'a str> {
        if message.author_id == self.bot_id {
            return None;
        }
        message
            .content
            .trim()
            .strip_prefix(self.trigger.as_str())
            .map(str::trim)
    }

    /// Process one message.
    ///
    /// Handler failures come back as [`Outcome`] variants. Only a failure to
    /// persist state is an error.
    pub async fn handle(&self, message: &InboundMessage) -> Result<Outcome, BotError> {
        let Some(payload) = self.payload(message) else {
            return Ok(Outcome::Ignored);
        };

        debug!(
            author_id = %message.author_id,
            channel = %message.channel,
            payload = payload,
            "dispatching command"
        );

        let state = self.store.get(&message.author_id);
        let result = match self.loader.invoke(payload, &state).await {
            Ok(result) => result,
            Err(InvocationError::Load(e)) => {
                warn!(handler = %self.loader.source(), error = %e, "failed to load handler");
                return Ok(Outcome::LoadFailed(e.to_string()));
            }
            Err(InvocationError::Fault(e)) => {
                info!(author_id = %message.author_id, error = %e, "handler faulted");
                return Ok(Outcome::Faulted(e.to_string()));
            }
            Err(InvocationError::Contract(e)) => {
                info!(author_id = %message.author_id, error = %e, "handler broke the result contract");
                return Ok(Outcome::ContractViolated(e.to_string()));
            }
        };

        self.store.set(&message.author_id, result.state)?;
        Ok(Outcome::Replied(result.output))
    }
}
