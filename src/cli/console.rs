//! Console message loop.
//!
//! Every non-blank input line becomes one [`ChatMessage`] in the configured
//! room. Plain replies are written as text; rich room events are written as a
//! single JSON line.

use issue_linker::skill::ChannelCapabilities;
use issue_linker::{
    ChatMessage, IssueLinker, LinkerConfig, LinkerError, OutgoingReply, RoomId, UserId,
};
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Where console messages appear to come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleContext {
    /// Room every line is posted in.
    pub room: RoomId,
    /// Sender of every line.
    pub user: UserId,
    /// Capabilities advertised for every line.
    pub capabilities: ChannelCapabilities,
}

impl ConsoleContext {
    /// Reads the console identity and capabilities from configuration.
    #[must_use]
    pub fn from_config(config: &LinkerConfig) -> Self {
        Self {
            room: config.room_id(),
            user: config.user_id(),
            capabilities: config.capabilities(),
        }
    }
}

/// Feeds `reader` line by line through `linker` and writes replies to
/// `writer` until end of input.
///
/// # Errors
///
/// Returns [`LinkerError::Io`] when reading or writing fails.
pub async fn run_console<Reader, Writer>(
    reader: Reader,
    writer: &mut Writer,
    linker: &IssueLinker,
    context: &ConsoleContext,
) -> Result<(), LinkerError>
where
    Reader: AsyncBufRead + Unpin,
    Writer: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut sequence: u64 = 0;

    while let Some(line) = lines.next_line().await.map_err(|error| io_error(&error))? {
        if line.trim().is_empty() {
            continue;
        }
        sequence = sequence.saturating_add(1);

        let message = ChatMessage::new(line, context.room.clone(), context.user.clone())
            .with_event_id(format!("$console-{sequence}"))
            .with_capabilities(context.capabilities);

        for reply in linker.handle(&message).await {
            let rendered = render_reply(&reply)?;
            writer
                .write_all(rendered.as_bytes())
                .await
                .map_err(|error| io_error(&error))?;
            writer
                .write_all(b"\n")
                .await
                .map_err(|error| io_error(&error))?;
        }
        writer.flush().await.map_err(|error| io_error(&error))?;
    }

    Ok(())
}

fn render_reply(reply: &OutgoingReply) -> Result<String, LinkerError> {
    match reply {
        OutgoingReply::Reply { text, .. } | OutgoingReply::Message { text } => Ok(text.clone()),
        OutgoingReply::RoomEvent {
            event_type,
            content,
        } => serde_json::to_string(&json!({ "type": event_type, "content": content })).map_err(
            |error| LinkerError::Io {
                message: format!("failed to serialise room event: {error}"),
            },
        ),
    }
}

fn io_error(error: &std::io::Error) -> LinkerError {
    LinkerError::Io {
        message: error.to_string(),
    }
}
