//! Incoming chat messages as seen by the skill.

use std::fmt;

use crate::room::RoomId;

/// Identity of a chat user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Wraps a connector-specific user identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the connector that delivered a message can do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelCapabilities {
    /// The connector accepts raw room events with HTML bodies.
    pub rich_replies: bool,
    /// Rich replies should be sent as notices rather than text.
    pub send_notices: bool,
    /// The room exposes power levels that gate configuration.
    pub power_levels: bool,
}

/// A message received from a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Message body.
    pub text: String,
    /// Room the message was posted in.
    pub room: RoomId,
    /// Sender of the message.
    pub user: UserId,
    /// Connector event id, used to thread replies.
    pub event_id: Option<String>,
    /// Capabilities of the delivering connector.
    pub capabilities: ChannelCapabilities,
}

impl ChatMessage {
    /// Creates a message with no event id and plain capabilities.
    #[must_use]
    pub fn new(text: impl Into<String>, room: RoomId, user: UserId) -> Self {
        Self {
            text: text.into(),
            room,
            user,
            event_id: None,
            capabilities: ChannelCapabilities::default(),
        }
    }

    /// Sets the event id replies should thread onto.
    #[must_use]
    pub fn with_event_id(self, event_id: impl Into<String>) -> Self {
        Self {
            event_id: Some(event_id.into()),
            ..self
        }
    }

    /// Sets the connector capabilities.
    #[must_use]
    pub fn with_capabilities(self, capabilities: ChannelCapabilities) -> Self {
        Self {
            capabilities,
            ..self
        }
    }
}
