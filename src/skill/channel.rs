//! Reply envelopes and the channels that build them.
//!
//! A [`ReplyChannel`] is chosen once per message from its
//! [`ChannelCapabilities`]. Connectors that understand raw room events get a
//! [`RichChannel`]; everything else gets a [`PlainChannel`].

use serde_json::{Value, json};

use super::format::IssueSummary;
use super::message::{ChannelCapabilities, ChatMessage};

/// Event type used for rich replies.
pub const ROOM_MESSAGE_EVENT: &str = "m.room.message";

/// Body format marker for HTML bodies.
pub const HTML_FORMAT: &str = "org.matrix.custom.html";

/// Something the host should post back to the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingReply {
    /// Plain text linked to the triggering event.
    Reply {
        /// Reply body.
        text: String,
        /// Event the reply answers, when the connector supplied one.
        in_reply_to: Option<String>,
    },
    /// Plain text posted to the room without threading.
    Message {
        /// Message body.
        text: String,
    },
    /// A raw room event for connectors with rich replies.
    RoomEvent {
        /// Event type, always [`ROOM_MESSAGE_EVENT`].
        event_type: String,
        /// Event content.
        content: Value,
    },
}

impl OutgoingReply {
    /// Plain-text body of the reply, for logging and text-only hosts.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Reply { text, .. } | Self::Message { text } => text,
            Self::RoomEvent { content, .. } => content
                .get("body")
                .and_then(Value::as_str)
                .unwrap_or_default(),
        }
    }
}

/// Builds the reply envelope for an issue summary.
pub trait ReplyChannel: Send + Sync {
    /// Wraps `summary` as a reply to `message`.
    fn issue_reply(&self, message: &ChatMessage, summary: &IssueSummary) -> OutgoingReply;
}

/// Channel emitting `m.room.message` events with an HTML body.
#[derive(Debug, Clone, Copy, Default)]
pub struct RichChannel {
    send_notices: bool,
}

impl RichChannel {
    /// Creates a rich channel; `send_notices` selects `m.notice` over
    /// `m.text`.
    #[must_use]
    pub const fn new(send_notices: bool) -> Self {
        Self { send_notices }
    }

    const fn msgtype(self) -> &'static str {
        if self.send_notices {
            "m.notice"
        } else {
            "m.text"
        }
    }
}

impl ReplyChannel for RichChannel {
    fn issue_reply(&self, message: &ChatMessage, summary: &IssueSummary) -> OutgoingReply {
        OutgoingReply::RoomEvent {
            event_type: ROOM_MESSAGE_EVENT.to_owned(),
            content: json!({
                "body": summary.plain,
                "format": HTML_FORMAT,
                "formatted_body": summary.rich,
                "msgtype": self.msgtype(),
                "m.relates_to": {
                    "m.in_reply_to": {
                        "event_id": message.event_id,
                    },
                },
            }),
        }
    }
}

/// Channel emitting plain text replies.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainChannel;

impl ReplyChannel for PlainChannel {
    fn issue_reply(&self, message: &ChatMessage, summary: &IssueSummary) -> OutgoingReply {
        OutgoingReply::Reply {
            text: summary.plain.clone(),
            in_reply_to: message.event_id.clone(),
        }
    }
}

/// Picks the channel matching the connector's capabilities.
#[must_use]
pub fn channel_for(capabilities: ChannelCapabilities) -> Box<dyn ReplyChannel> {
    if capabilities.rich_replies {
        Box::new(RichChannel::new(capabilities.send_notices))
    } else {
        Box::new(PlainChannel)
    }
}
