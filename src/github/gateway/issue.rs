//! Octocrab implementation of the issue gateway.

use async_trait::async_trait;
use http::{StatusCode, Uri};
use octocrab::Octocrab;

use crate::github::error::LookupError;
use crate::github::locator::IssueCoordinates;
use crate::github::models::{ApiIssue, IssueRecord};

use super::IssueGateway;
use super::client::{GatewaySettings, build_octocrab_client};
use super::error_mapping::{map_http_status, map_octocrab_error};

/// Octocrab-backed gateway issuing one `GET /repos/{org}/{repo}/issues/{n}`
/// per lookup.
pub struct OctocrabIssueGateway {
    client: Octocrab,
}

impl OctocrabIssueGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds the Octocrab client described by `settings`.
    ///
    /// Must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Configuration`] when the client cannot be
    /// constructed.
    pub fn from_settings(settings: &GatewaySettings) -> Result<Self, LookupError> {
        build_octocrab_client(settings).map(Self::new)
    }
}

#[async_trait]
impl IssueGateway for OctocrabIssueGateway {
    async fn issue(&self, coordinates: &IssueCoordinates) -> Result<IssueRecord, LookupError> {
        let uri: Uri =
            coordinates
                .issue_path()
                .parse::<Uri>()
                .map_err(|error| LookupError::Configuration {
                    message: format!("issue path for {coordinates} is invalid: {error}"),
                })?;

        let response = self
            .client
            ._get(uri)
            .await
            .map_err(|error| map_octocrab_error("issue lookup", &error))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = self
                .client
                .body_to_string(response)
                .await
                .unwrap_or_else(|_| String::new());
            let error = map_http_status(status, &body);
            tracing::error!("GitHub API request for {coordinates} failed: {error}");
            return Err(error);
        }

        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(|error| map_octocrab_error("issue body", &error))?;

        let api: ApiIssue =
            serde_json::from_str(&body).map_err(|error| LookupError::InvalidResponse {
                message: error.to_string(),
            })?;

        Ok(api.into())
    }
}
