//! Changing a room's default repository.

use thiserror::Error;

use crate::room::{RoomDefaults, RoomId, RoomStore, StoreError};

use super::command::DefaultRepoCommand;
use super::message::UserId;
use super::permissions::PowerLevelSource;

/// Why a default repository change was refused or failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigureError {
    /// The requester's power level is below the room's requirement.
    #[error("Not authorised, you must have at least power level {required}")]
    Unauthorized {
        /// Level the room requires.
        required: i64,
        /// Level the requester holds.
        actual: i64,
    },

    /// The room's power levels could not be read.
    #[error("Couldn't check power levels: {message}")]
    PermissionLookup {
        /// Source error detail.
        message: String,
    },

    /// The room store rejected the new defaults.
    #[error("Failed to store the default repository: {0}")]
    Persist(StoreError),
}

/// Authorises and persists default repository changes.
pub struct DefaultRepoConfigurator<'a> {
    store: &'a dyn RoomStore,
    power_levels: Option<&'a dyn PowerLevelSource>,
}

impl<'a> DefaultRepoConfigurator<'a> {
    /// Creates a configurator writing to `store`.
    ///
    /// `power_levels` is consulted only when a change must be authorised.
    #[must_use]
    pub const fn new(
        store: &'a dyn RoomStore,
        power_levels: Option<&'a dyn PowerLevelSource>,
    ) -> Self {
        Self {
            store,
            power_levels,
        }
    }

    /// Sets the room's default organisation and repository.
    ///
    /// When `enforce_power_levels` is set the requester needs at least the
    /// level required to change `m.room.power_levels`; nothing is written
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigureError::Unauthorized`] or
    /// [`ConfigureError::PermissionLookup`] before any write, and
    /// [`ConfigureError::Persist`] when the store fails.
    pub async fn set_default(
        &self,
        room: &RoomId,
        requester: &UserId,
        command: &DefaultRepoCommand,
        enforce_power_levels: bool,
    ) -> Result<(), ConfigureError> {
        if enforce_power_levels {
            self.authorise(room, requester).await?;
        }

        RoomDefaults::save(
            self.store,
            room,
            &command.organization,
            &command.repository,
        )
        .await
        .map_err(|error| {
            tracing::error!("Failed to store default repository for {room}: {error}");
            ConfigureError::Persist(error)
        })?;

        tracing::info!(
            "Default repository for {room} set to {}/{} by {requester}",
            command.organization,
            command.repository
        );
        Ok(())
    }

    async fn authorise(&self, room: &RoomId, requester: &UserId) -> Result<(), ConfigureError> {
        let Some(source) = self.power_levels else {
            return Err(ConfigureError::PermissionLookup {
                message: "no power level source is configured".to_owned(),
            });
        };

        let levels = source.power_levels(room).await.map_err(|error| {
            tracing::warn!("Failed to read power levels for {room}: {error}");
            ConfigureError::PermissionLookup {
                message: error.to_string(),
            }
        })?;

        let required = levels.required_level();
        let actual = levels.user_level(requester);
        if actual < required {
            tracing::info!("{requester} ({actual}) may not change defaults in {room} ({required})");
            return Err(ConfigureError::Unauthorized { required, actual });
        }

        Ok(())
    }
}
