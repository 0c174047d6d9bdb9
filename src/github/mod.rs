//! GitHub issue reference detection and lookup.
//!
//! This module finds `org/repo#123` style references in chat text and
//! resolves them through the GitHub REST API with Octocrab. Lookup failures
//! are mapped into [`LookupError`] so callers can tell a missing issue from a
//! transient network failure without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod lookup;
pub mod models;
pub mod reference;

pub use error::LookupError;
pub use gateway::{
    DEFAULT_REQUEST_TIMEOUT, GatewaySettings, IssueGateway, OctocrabIssueGateway,
};
pub use locator::{DEFAULT_API_BASE, IssueCoordinates, PersonalAccessToken, parse_api_base};
pub use lookup::IssueLookup;
pub use models::{IssueLabel, IssueMilestone, IssueRecord};
pub use reference::{IssueNumber, IssueReference, extract_references};

#[cfg(test)]
pub use gateway::MockIssueGateway;

#[cfg(test)]
mod tests;
