//! Octocrab client construction for the issue gateway.

use std::time::Duration;

use http::Uri;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use url::Url;

use crate::github::error::LookupError;
use crate::github::locator::{PersonalAccessToken, parse_api_base};

use super::error_mapping::map_octocrab_error;

/// Default bound on connecting to and reading from GitHub.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings used to build the GitHub client.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// REST API base URL.
    pub api_base: Url,
    /// Optional token; without one requests are anonymous.
    pub token: Option<PersonalAccessToken>,
    /// Connect and read timeout for each request.
    pub timeout: Duration,
}

impl GatewaySettings {
    /// Settings for anonymous access to an API base with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Configuration`] when `api_base` is not a valid
    /// http(s) URL.
    pub fn anonymous(api_base: &str) -> Result<Self, LookupError> {
        Ok(Self {
            api_base: parse_api_base(api_base)?,
            token: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Sets the token used to authenticate requests.
    #[must_use]
    pub fn with_token(self, token: Option<PersonalAccessToken>) -> Self {
        Self { token, ..self }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
}

/// Builds an Octocrab client that makes a single attempt per request.
///
/// # Errors
///
/// Returns [`LookupError::Configuration`] when the base URI cannot be parsed
/// or Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(settings: &GatewaySettings) -> Result<Octocrab, LookupError> {
    let base_uri: Uri = settings
        .api_base
        .as_str()
        .parse::<Uri>()
        .map_err(|error| LookupError::Configuration {
            message: format!("API base URL is invalid: {error}"),
        })?;

    let configured = Octocrab::builder()
        .base_uri(base_uri)
        .map_err(|error| LookupError::Configuration {
            message: format!("build client failed: {error}"),
        })?
        .add_retry_config(RetryConfig::None)
        .set_connect_timeout(Some(settings.timeout))
        .set_read_timeout(Some(settings.timeout));

    let authenticated = match settings.token.as_ref() {
        Some(token) => configured.personal_token(token.value().to_owned()),
        None => configured,
    };

    authenticated
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
