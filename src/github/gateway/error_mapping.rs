//! Error mapping helpers for the Octocrab issue gateway.

use http::StatusCode;

use crate::github::error::LookupError;

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> LookupError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return LookupError::NotFound {
            status: source.status_code.as_u16(),
            message: format!("{operation} failed: {}", source.message),
        };
    }

    if is_network_error(error) {
        return LookupError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    LookupError::Configuration {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a non-200 response into [`LookupError::NotFound`].
pub(super) fn map_http_status(status: StatusCode, body: &str) -> LookupError {
    let message = extract_github_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_owned()
    });
    LookupError::NotFound {
        status: status.as_u16(),
        message,
    }
}

pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}
