//! Issue linker library crate: a chat skill that expands GitHub issue
//! references into summaries.
//!
//! Messages are scanned for `org/repo#123` and `#123` references. Each one is
//! resolved through the GitHub REST API, falling back to the room's default
//! repository for bare references, and answered with a plain or rich
//! summary. Rooms change their default with `!github default_repo org/repo`.
//!
//! The chat framework is external: hosts hand [`ChatMessage`] values to
//! [`IssueLinker::handle`] and post the returned [`OutgoingReply`] values.

pub mod config;
pub mod error;
pub mod github;
pub mod persistence;
pub mod room;
pub mod skill;
pub mod telemetry;

pub use config::LinkerConfig;
pub use error::LinkerError;
pub use github::{
    GatewaySettings, IssueGateway, IssueRecord, IssueReference, LookupError,
    OctocrabIssueGateway, extract_references,
};
pub use room::{MemoryRoomStore, RoomId, RoomStore};
pub use skill::{ChatMessage, IssueLinker, LinkerOptions, OutgoingReply, UserId};
