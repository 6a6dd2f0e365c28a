//! Chat front end for tutorbot.
//!
//! Listens for messages starting with the trigger token (default `!run`),
//! hands the rest of the message to the student's handler together with the
//! author's stored state, saves the state the handler returns, and replies
//! with its output.
//!
//! # Architecture
//!
//! ```text
//! transport (inbound) --> Dispatcher --> HandlerLoader (reload + invoke) --> StateStore --> transport (reply)
//! ```
//!
//! The handler is reloaded before every message, so students can edit their
//! handler and try it again without restarting the bot.

mod config;
mod dispatch;
mod error;
mod nats;
mod transport;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use tutorbot_handler::HandlerLoader;
use tutorbot_store::StateStore;

use crate::config::BotConfig;
use crate::dispatch::Dispatcher;
use crate::transport::Transport;

/// Application entry point.
///
/// Initializes logging, loads configuration (refusing to start without a
/// token), opens the state store, connects the transport, and runs the
/// message loop until the inbound stream ends.
///
/// # Errors
///
/// Returns an error if configuration, transport setup, or the message loop
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal; real environment variables still apply.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("tutorbot-bot starting");

    let config = BotConfig::from_env()?;
    info!(
        bot_user_id = %config.bot_user_id,
        trigger = config.trigger,
        state_path = %config.state_path.display(),
        handler = %config.handler,
        handler_timeout_ms = config.handler_timeout.as_millis(),
        transport = ?config.transport,
        "configuration loaded"
    );

    let store = Arc::new(StateStore::open(&config.state_path));
    let loader = HandlerLoader::new(config.handler.clone(), config.handler_timeout);
    let dispatcher = Dispatcher::new(
        config.bot_user_id.clone(),
        config.trigger.clone(),
        loader,
        store,
    );

    let transport = Transport::connect(&config).await?;
    info!("front end initialized, entering message loop");
    transport.run(&dispatcher).await?;

    Ok(())
}
