//! NATS bridge to the chat network.
//!
//! A separate bridge process connects to the actual chat service. It
//! publishes every received message as JSON on `chat.inbound` and relays
//! anything published on `chat.outbound.<channel>` back to that channel.

use tracing::{debug, info};
use tutorbot_types::{ChannelId, InboundMessage};

use crate::error::BotError;

/// Subject inbound chat messages arrive on.
pub const INBOUND_SUBJECT: &str = "chat.inbound";

/// Prefix of the subjects replies are published on.
const OUTBOUND_PREFIX: &str = "chat.outbound";

/// NATS client wrapper for the front end.
pub struct NatsBridge {
    client: async_nats::Client,
}

impl NatsBridge {
    /// Connect to a NATS server, authenticating with `token`.
    pub async fn connect(url: &str, token: &str) -> Result<Self, BotError> {
        info!(url = url, "connecting to NATS server");
        let client = async_nats::ConnectOptions::with_token(token.to_owned())
            .connect(url)
            .await
            .map_err(|e| BotError::Nats(format!("failed to connect to {url}: {e}")))?;
        info!("NATS connection established");
        Ok(Self { client })
    }

    /// Subscribe to inbound chat messages.
    pub async fn subscribe_inbound(&self) -> Result<async_nats::Subscriber, BotError> {
        let subscriber = self
            .client
            .subscribe(INBOUND_SUBJECT.to_owned())
            .await
            .map_err(|e| BotError::Nats(format!("failed to subscribe to {INBOUND_SUBJECT}: {e}")))?;
        info!(subject = INBOUND_SUBJECT, "subscribed to inbound chat messages");
        Ok(subscriber)
    }

    /// Publish a reply to `channel`.
    pub async fn send(&self, channel: &ChannelId, text: &str) -> Result<(), BotError> {
        let subject = outbound_subject(channel);
        debug!(subject = subject, len = text.len(), "publishing reply");
        self.client
            .publish(subject.clone(), text.to_owned().into())
            .await
            .map_err(|e| BotError::Nats(format!("failed to publish to {subject}: {e}")))
    }

    /// Deserialize a NATS payload into an [`InboundMessage`].
    pub fn deserialize_message(data: &[u8]) -> Result<InboundMessage, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

impl std::fmt::Debug for NatsBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsBridge")
            .field("connected", &true)
            .finish()
    }
}

/// The reply subject for a channel.
///
/// Characters with meaning in NATS subjects are replaced with `_`.
pub fn outbound_subject(channel: &ChannelId) -> String {
    let token: String = channel
        .as_str()
        .chars()
        .map(|c| match c {
            '.' | '*' | '>' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();
    format!("{OUTBOUND_PREFIX}.{token}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn outbound_subject_uses_channel() {
        assert_eq!(
            outbound_subject(&ChannelId::from("123456")),
            "chat.outbound.123456"
        );
    }

    #[test]
    fn outbound_subject_escapes_wildcards() {
        assert_eq!(
            outbound_subject(&ChannelId::from("a.b *>c")),
            "chat.outbound.a_b___c"
        );
    }

    #[test]
    fn deserialize_valid_message() {
        let payload = br#"{"author_id": "42", "channel": "general", "content": "!run show"}"#;
        let message = NatsBridge::deserialize_message(payload).ok();
        assert_eq!(
            message,
            Some(InboundMessage::new("42", "general", "!run show"))
        );
    }

    #[test]
    fn deserialize_invalid_message() {
        assert!(NatsBridge::deserialize_message(b"not json").is_err());
        assert!(NatsBridge::deserialize_message(br#"{"content": "x"}"#).is_err());
    }

    // Requires a live NATS server.
    #[tokio::test]
    #[ignore = "requires live NATS server"]
    async fn connect_to_nats() {
        let result = NatsBridge::connect("nats://localhost:4222", "dev-token").await;
        assert!(result.is_ok());
    }
}
