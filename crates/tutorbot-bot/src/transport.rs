//! Chat transports and the receive-dispatch-reply loop.
//!
//! Messages are handled strictly one at a time: the next message is not read
//! until the previous one has been dispatched and answered.

use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};
use tutorbot_types::InboundMessage;

use crate::config::{BotConfig, TransportKind};
use crate::dispatch::Dispatcher;
use crate::error::BotError;
use crate::nats::NatsBridge;

/// Author and channel assigned to plain-text console lines.
const CONSOLE_ID: &str = "console";

/// A connected chat transport.
#[derive(Debug)]
pub enum Transport {
    /// stdin/stdout.
    Console,
    /// NATS bridge.
    Nats(NatsBridge),
}

impl Transport {
    /// Connect the transport selected in `config`.
    pub async fn connect(config: &BotConfig) -> Result<Self, BotError> {
        match config.transport {
            TransportKind::Console => Ok(Self::Console),
            TransportKind::Nats => Ok(Self::Nats(
                NatsBridge::connect(&config.nats_url, &config.token).await?,
            )),
        }
    }

    /// Receive and dispatch messages until the inbound stream ends.
    pub async fn run(&self, dispatcher: &Dispatcher) -> Result<(), BotError> {
        match self {
            Self::Console => run_console(dispatcher).await,
            Self::Nats(bridge) => run_nats(bridge, dispatcher).await,
        }
    }
}

/// Dispatch one message and decide what, if anything, to send back.
///
/// A persistence failure is logged and reported to the channel; the loop
/// carries on with the next message.
pub async fn reply_for(dispatcher: &Dispatcher, message: &InboundMessage) -> Option<String> {
    match dispatcher.handle(message).await {
        Ok(outcome) => outcome.reply(),
        Err(e) => {
            error!(
                author_id = %message.author_id,
                channel = %message.channel,
                error = %e,
                "failed to persist state"
            );
            Some(format!("Bot error saving state: {e}"))
        }
    }
}

/// Interpret one console line.
///
/// A JSON [`InboundMessage`] is used as-is; anything else is a message from
/// the console user in the console channel.
pub fn parse_console_line(line: &str) -> InboundMessage {
    serde_json::from_str(line).unwrap_or_else(|_| InboundMessage::new(CONSOLE_ID, CONSOLE_ID, line))
}

async fn run_console(dispatcher: &Dispatcher) -> Result<(), BotError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    info!("console transport ready, reading messages from stdin");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let message = parse_console_line(&line);
        if let Some(reply) = reply_for(dispatcher, &message).await {
            stdout
                .write_all(format!("[{}] {reply}\n", message.channel).as_bytes())
                .await?;
            stdout.flush().await?;
        }
    }

    info!("stdin closed, console transport shutting down");
    Ok(())
}

async fn run_nats(bridge: &NatsBridge, dispatcher: &Dispatcher) -> Result<(), BotError> {
    let mut subscriber = bridge.subscribe_inbound().await?;

    while let Some(delivery) = subscriber.next().await {
        let message = match NatsBridge::deserialize_message(&delivery.payload) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "failed to deserialize inbound message, skipping");
                continue;
            }
        };

        if let Some(reply) = reply_for(dispatcher, &message).await
            && let Err(e) = bridge.send(&message.channel, &reply).await
        {
            warn!(channel = %message.channel, error = %e, "failed to send reply");
        }
    }

    info!("NATS subscription ended, front end shutting down");
    Ok(())
}
