//! Gateways for loading issues through Octocrab.
//!
//! The trait keeps the skill independent of HTTP so tests can substitute a
//! mock, while [`OctocrabIssueGateway`] performs the real request.

mod client;
mod error_mapping;
mod issue;

pub use client::{DEFAULT_REQUEST_TIMEOUT, GatewaySettings};
pub use issue::OctocrabIssueGateway;

use async_trait::async_trait;

use crate::github::error::LookupError;
use crate::github::locator::IssueCoordinates;
use crate::github::models::IssueRecord;

/// Gateway that can load a single issue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueGateway: Send + Sync {
    /// Fetch one issue. Any status other than 200 is reported as
    /// [`LookupError::NotFound`].
    async fn issue(&self, coordinates: &IssueCoordinates) -> Result<IssueRecord, LookupError>;
}
