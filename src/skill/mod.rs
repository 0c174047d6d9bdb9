//! The issue-linking chat skill.
//!
//! [`IssueLinker`] receives a [`ChatMessage`] and returns the
//! [`OutgoingReply`] values the host should post. Messages starting with
//! `!github default_repo org/repo` change the room's default repository;
//! every other message is scanned for issue references, each of which is
//! looked up and answered in order.

pub mod channel;
pub mod command;
pub mod configure;
pub mod format;
mod linker;
pub mod message;
pub mod permissions;

pub use channel::{OutgoingReply, PlainChannel, ReplyChannel, RichChannel, channel_for};
pub use command::DefaultRepoCommand;
pub use configure::{ConfigureError, DefaultRepoConfigurator};
pub use format::{FormatError, IssueSummary, SummaryTemplates};
pub use linker::{IssueLinker, LinkerOptions, MISSING_DEFAULT_REMINDER};
pub use message::{ChannelCapabilities, ChatMessage, UserId};
pub use permissions::{PowerLevelError, PowerLevelSource, PowerLevels, StaticPowerLevels};
