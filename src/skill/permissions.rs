//! Room power levels used to gate configuration changes.
//!
//! The shape mirrors the content of a Matrix `m.room.power_levels` state
//! event. Only the fields the configurator reads are modelled.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::room::RoomId;

use super::message::UserId;

/// Event type whose required level guards the default repository.
pub const POWER_LEVELS_EVENT: &str = "m.room.power_levels";

/// Required level when the room does not name one.
pub const DEFAULT_REQUIRED_LEVEL: i64 = 100;

/// Power levels of a room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PowerLevels {
    /// Level required to send each state event type.
    pub events: HashMap<String, i64>,
    /// Explicit user levels.
    pub users: HashMap<String, i64>,
    /// Level of users without an explicit entry.
    pub users_default: i64,
}

impl PowerLevels {
    /// Level needed to change the default repository.
    #[must_use]
    pub fn required_level(&self) -> i64 {
        self.events
            .get(POWER_LEVELS_EVENT)
            .copied()
            .unwrap_or(DEFAULT_REQUIRED_LEVEL)
    }

    /// Level held by `user`.
    #[must_use]
    pub fn user_level(&self, user: &UserId) -> i64 {
        self.users
            .get(user.as_str())
            .copied()
            .unwrap_or(self.users_default)
    }
}

/// Failure reading a room's power levels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PowerLevelError {
    /// The host could not provide the power levels.
    #[error("power levels unavailable for {room}: {message}")]
    Unavailable {
        /// Room whose levels were requested.
        room: String,
        /// Host error detail.
        message: String,
    },
    /// The power level file could not be read.
    #[error("failed to read power levels from {path}: {message}")]
    Unreadable {
        /// File that was requested.
        path: String,
        /// I/O error detail.
        message: String,
    },
    /// The power level document did not parse.
    #[error("power levels are malformed: {message}")]
    Malformed {
        /// Parser error detail.
        message: String,
    },
}

/// Source of room power levels, implemented by the chat host.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PowerLevelSource: Send + Sync {
    /// Reads the current power levels of `room`.
    async fn power_levels(&self, room: &RoomId) -> Result<PowerLevels, PowerLevelError>;
}

/// The same power levels for every room, typically read from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPowerLevels {
    levels: PowerLevels,
}

impl StaticPowerLevels {
    /// Serves `levels` for every room.
    #[must_use]
    pub const fn new(levels: PowerLevels) -> Self {
        Self { levels }
    }

    /// Parses `m.room.power_levels` content from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PowerLevelError::Malformed`] when the JSON does not parse.
    pub fn from_json(json: &str) -> Result<Self, PowerLevelError> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|error| PowerLevelError::Malformed {
                message: error.to_string(),
            })
    }

    /// Reads power levels from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`PowerLevelError`] when the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, PowerLevelError> {
        let json = std::fs::read_to_string(path).map_err(|error| PowerLevelError::Unreadable {
            path: path.display().to_string(),
            message: error.to_string(),
        })?;
        Self::from_json(&json)
    }
}

#[async_trait]
impl PowerLevelSource for StaticPowerLevels {
    async fn power_levels(&self, _room: &RoomId) -> Result<PowerLevels, PowerLevelError> {
        Ok(self.levels.clone())
    }
}
