//! Configuration for the chat front end.
//!
//! All configuration comes from environment variables (optionally seeded
//! from a `.env` file by `main`). The secret token is the only required
//! value; the process refuses to start without it.

use std::path::PathBuf;
use std::time::Duration;

use tutorbot_handler::HandlerSource;
use tutorbot_types::UserId;

use crate::error::BotError;

/// Complete front end configuration.
#[derive(Clone)]
pub struct BotConfig {
    /// Secret token used to authenticate with the chat bridge.
    pub token: String,
    /// The bot's own user ID; messages from it are ignored.
    pub bot_user_id: UserId,
    /// Prefix that marks a message as a command for this bot.
    pub trigger: String,
    /// Path to the JSON state file.
    pub state_path: PathBuf,
    /// Where student handler code is loaded from.
    pub handler: HandlerSource,
    /// Limit on a single handler invocation.
    pub handler_timeout: Duration,
    /// Which chat transport to run.
    pub transport: TransportKind,
    /// NATS server URL, used by the `nats` transport.
    pub nats_url: String,
}

/// Supported chat transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Line-oriented stdin/stdout, for local development.
    Console,
    /// NATS subjects bridged to a chat service.
    Nats,
}

impl BotConfig {
    /// Load configuration from the process environment.
    ///
    /// Required variables:
    /// - `BOT_TOKEN` -- secret token for the chat bridge
    ///
    /// Optional variables:
    /// - `BOT_USER_ID` -- the bot's own sender ID (default `tutorbot`)
    /// - `TRIGGER_TOKEN` -- command prefix (default `!run`)
    /// - `STATE_PATH` -- state file path (default `state.json`)
    /// - `HANDLER` -- handler source (default `builtin:starter`)
    /// - `HANDLER_TIMEOUT_MS` -- per-invocation limit (default 10000)
    /// - `TRANSPORT` -- `console` or `nats` (default `console`)
    /// - `NATS_URL` -- NATS server (default `nats://localhost:4222`)
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BotError> {
        let token = lookup("BOT_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| BotError::Config(String::from("missing required env var BOT_TOKEN")))?;

        let bot_user_id = UserId::from(lookup("BOT_USER_ID").unwrap_or_else(|| "tutorbot".to_owned()));

        let trigger = lookup("TRIGGER_TOKEN").unwrap_or_else(|| "!run".to_owned());
        if trigger.trim().is_empty() {
            return Err(BotError::Config(String::from("TRIGGER_TOKEN must not be empty")));
        }

        let state_path = PathBuf::from(lookup("STATE_PATH").unwrap_or_else(|| "state.json".to_owned()));

        let handler: HandlerSource = lookup("HANDLER")
            .unwrap_or_else(|| "builtin:starter".to_owned())
            .parse()
            .map_err(|e| BotError::Config(format!("invalid HANDLER: {e}")))?;

        let handler_timeout_ms: u64 = lookup("HANDLER_TIMEOUT_MS")
            .unwrap_or_else(|| "10000".to_owned())
            .parse()
            .map_err(|e| BotError::Config(format!("invalid HANDLER_TIMEOUT_MS: {e}")))?;

        let transport = match lookup("TRANSPORT")
            .unwrap_or_else(|| "console".to_owned())
            .to_lowercase()
            .as_str()
        {
            "console" => TransportKind::Console,
            "nats" => TransportKind::Nats,
            other => {
                return Err(BotError::Config(format!("unknown transport: {other}")));
            }
        };

        let nats_url = lookup("NATS_URL").unwrap_or_else(|| "nats://localhost:4222".to_owned());

        Ok(Self {
            token,
            bot_user_id,
            trigger: trigger.trim().to_owned(),
            state_path,
            handler,
            handler_timeout: Duration::from_millis(handler_timeout_ms),
            transport,
            nats_url,
        })
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("bot_user_id", &self.bot_user_id)
            .field("trigger", &self.trigger)
            .field("state_path", &self.state_path)
            .field("handler", &self.handler)
            .field("handler_timeout", &self.handler_timeout)
            .field("transport", &self.transport)
            .field("nats_url", &self.nats_url)
            .finish()
    }
}
