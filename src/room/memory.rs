//! In-process room store.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{RoomId, RoomStore, StoreError};

/// Room memory held in a process-local map.
///
/// Suitable for tests and for hosts that do not need defaults to survive a
/// restart.
#[derive(Debug, Default)]
pub struct MemoryRoomStore {
    entries: Mutex<HashMap<(RoomId, String), String>>,
}

impl MemoryRoomStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn get(&self, room: &RoomId, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(&(room.clone(), key.to_owned())).cloned())
    }

    async fn put(&self, room: &RoomId, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert((room.clone(), key.to_owned()), value.to_owned());
        Ok(())
    }

    async fn put_all(
        &self,
        room: &RoomId,
        entries: &[(String, String)],
    ) -> Result<(), StoreError> {
        let mut stored = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in entries {
            stored.insert((room.clone(), key.clone()), value.clone());
        }
        Ok(())
    }
}
