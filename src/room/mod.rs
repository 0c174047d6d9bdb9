//! Room-scoped key-value memory.
//!
//! The skill keeps its only state, the default organisation and repository,
//! in memory scoped to a chat room. [`RoomStore`] abstracts the backing
//! service so the pipeline can run against [`MemoryRoomStore`] in tests or
//! the `SQLite` store in [`crate::persistence`].

mod defaults;
mod error;
mod memory;

pub use defaults::{
    DEFAULT_ORG_KEY, DEFAULT_REPO_KEY, REMINDER_SENT_KEY, RoomDefaults, mark_reminder_sent,
    reminder_sent,
};
pub use error::StoreError;
pub use memory::MemoryRoomStore;

use std::fmt;

use async_trait::async_trait;

/// Identity of a chat room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    /// Wraps a connector-specific room identifier.
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

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key-value memory scoped to a room.
///
/// Writes are last-write-wins; implementations serialise their own writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Reads `key` from the room's memory.
    async fn get(&self, room: &RoomId, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn put(&self, room: &RoomId, key: &str, value: &str) -> Result<(), StoreError>;

    /// Writes every `(key, value)` pair as one unit: either all of them
    /// replace their previous values or none do.
    async fn put_all(&self, room: &RoomId, entries: &[(String, String)]) -> Result<(), StoreError>;
}
