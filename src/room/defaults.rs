//! Per-room default organisation and repository.

use crate::github::IssueReference;

use super::{RoomId, RoomStore, StoreError};

/// Memory key holding the room's default organisation.
pub const DEFAULT_ORG_KEY: &str = "default_org";

/// Memory key holding the room's default repository.
pub const DEFAULT_REPO_KEY: &str = "default_repo";

/// Memory key recording that the "no default repo" reminder was sent.
pub const REMINDER_SENT_KEY: &str = "default_repo_reminder_sent";

/// Default organisation and repository configured for a room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomDefaults {
    /// Default organisation, if configured.
    pub organization: Option<String>,
    /// Default repository, if configured.
    pub repository: Option<String>,
}

impl RoomDefaults {
    /// Reads the room's defaults.
    ///
    /// A failed read is logged and treated as "no default" so one flaky read
    /// never blocks the message.
    pub async fn load<Store>(store: &Store, room: &RoomId) -> Self
    where
        Store: RoomStore + ?Sized,
    {
        Self {
            organization: read_or_absent(store, room, DEFAULT_ORG_KEY).await,
            repository: read_or_absent(store, room, DEFAULT_REPO_KEY).await,
        }
    }

    /// Overwrites the room's defaults with `organization`/`repository`.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] raised by the store. Both keys are written
    /// in one [`RoomStore::put_all`], so a failure leaves the previous
    /// defaults in place.
    pub async fn save<Store>(
        store: &Store,
        room: &RoomId,
        organization: &str,
        repository: &str,
    ) -> Result<(), StoreError>
    where
        Store: RoomStore + ?Sized,
    {
        let entries = [
            (DEFAULT_ORG_KEY.to_owned(), organization.to_owned()),
            (DEFAULT_REPO_KEY.to_owned(), repository.to_owned()),
        ];
        store.put_all(room, &entries).await
    }

    /// Fills the fields `reference` omits from these defaults.
    ///
    /// Each field resolves independently: the reference's own value wins,
    /// otherwise the room default, otherwise `None`.
    #[must_use]
    pub fn resolve<'a>(
        &'a self,
        reference: &'a IssueReference,
    ) -> (Option<&'a str>, Option<&'a str>) {
        (
            reference.organization().or(self.organization.as_deref()),
            reference.repository().or(self.repository.as_deref()),
        )
    }
}

/// Returns true once the reminder has been recorded for `room`.
pub async fn reminder_sent<Store>(store: &Store, room: &RoomId) -> bool
where
    Store: RoomStore + ?Sized,
{
    read_or_absent(store, room, REMINDER_SENT_KEY)
        .await
        .is_some_and(|value| value == "true")
}

/// Records that the reminder was sent to `room`.
///
/// # Errors
///
/// Propagates the store's write failure.
pub async fn mark_reminder_sent<Store>(store: &Store, room: &RoomId) -> Result<(), StoreError>
where
    Store: RoomStore + ?Sized,
{
    store.put(room, REMINDER_SENT_KEY, "true").await
}

async fn read_or_absent<Store>(store: &Store, room: &RoomId, key: &str) -> Option<String>
where
    Store: RoomStore + ?Sized,
{
    match store.get(room, key).await {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!("failed to read {key} for room {room}: {error}");
            None
        }
    }
}
