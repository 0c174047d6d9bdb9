//! Errors raised by room stores.

use thiserror::Error;

use crate::persistence::PersistenceError;

/// Failure reading or writing room memory.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or queried.
    #[error("room memory is unavailable: {message}")]
    Unavailable {
        /// Backend error detail.
        message: String,
    },

    /// A write was rejected by the backing store.
    #[error("room memory rejected the write: {message}")]
    WriteRejected {
        /// Backend error detail.
        message: String,
    },
}

impl From<PersistenceError> for StoreError {
    fn from(error: PersistenceError) -> Self {
        match error {
            PersistenceError::WriteFailed { message } => Self::WriteRejected { message },
            other => Self::Unavailable {
                message: other.to_string(),
            },
        }
    }
}
