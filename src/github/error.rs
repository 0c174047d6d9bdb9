//! Error types exposed by the GitHub issue lookup layer.

use thiserror::Error;

/// Errors surfaced while resolving an issue reference against GitHub.
///
/// Callers only distinguish "found" from "not found" when replying, but the
/// variants keep transport failures apart so logging and telemetry can tell a
/// missing issue from a flaky network.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// Organisation, repository, or issue number was absent.
    #[error("issue reference is missing its organisation, repository, or number")]
    MissingCoordinates,

    /// GitHub answered with anything other than HTTP 200.
    #[error("GitHub returned {status}: {message}")]
    NotFound {
        /// HTTP status code returned by GitHub.
        status: u16,
        /// Message extracted from the response body, if any.
        message: String,
    },

    /// The request failed before a response was received.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// GitHub answered 200 but the body was not a usable issue.
    #[error("GitHub issue response could not be decoded: {message}")]
    InvalidResponse {
        /// Decoding error detail.
        message: String,
    },

    /// The API base URL or client configuration was rejected.
    #[error("GitHub client configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl LookupError {
    /// Returns true when the failure may succeed on a later attempt.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
