//! Inbound chat messages.

use serde::{Deserialize, Serialize};

use crate::ids::{ChannelId, UserId};

/// One message received from a chat transport.
///
/// This is everything the front end consumes from the chat network: who
/// wrote it, where it was posted, and the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// The author of the message.
    pub author_id: UserId,
    /// The channel the message was posted to. Replies go back here.
    pub channel: ChannelId,
    /// Raw message text, untrimmed.
    pub content: String,
}

impl InboundMessage {
    /// Build a message from its parts.
    pub fn new(
        author_id: impl Into<UserId>,
        channel: impl Into<ChannelId>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author_id: author_id.into(),
            channel: channel.into(),
            content: content.into(),
        }
    }
}
