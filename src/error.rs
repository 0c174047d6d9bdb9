//! Errors surfaced while starting or running a linker host.

use thiserror::Error;

use crate::github::LookupError;
use crate::persistence::PersistenceError;
use crate::skill::{FormatError, PowerLevelError};

/// Failure preventing a host from starting or continuing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkerError {
    /// Configuration was missing or invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The room memory database could not be prepared.
    #[error("persistence error: {message}")]
    Persistence {
        /// Details from the persistence layer.
        message: String,
    },

    /// Reading input or writing replies failed.
    #[error("I/O error: {message}")]
    Io {
        /// Details from the failed operation.
        message: String,
    },
}

impl From<LookupError> for LinkerError {
    fn from(error: LookupError) -> Self {
        Self::Configuration {
            message: error.to_string(),
        }
    }
}

impl From<FormatError> for LinkerError {
    fn from(error: FormatError) -> Self {
        Self::Configuration {
            message: error.to_string(),
        }
    }
}

impl From<PowerLevelError> for LinkerError {
    fn from(error: PowerLevelError) -> Self {
        Self::Configuration {
            message: error.to_string(),
        }
    }
}

impl From<PersistenceError> for LinkerError {
    fn from(error: PersistenceError) -> Self {
        match error {
            PersistenceError::BlankDatabaseUrl => Self::Configuration {
                message: error.to_string(),
            },
            other => Self::Persistence {
                message: other.to_string(),
            },
        }
    }
}
