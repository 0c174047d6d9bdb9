//! Issue resolution facade used by the skill.

use super::error::LookupError;
use super::gateway::IssueGateway;
use super::locator::IssueCoordinates;
use super::models::IssueRecord;
use super::reference::IssueNumber;

/// Resolves possibly incomplete issue coordinates through a gateway.
pub struct IssueLookup<'client, Gateway>
where
    Gateway: IssueGateway + ?Sized,
{
    client: &'client Gateway,
}

impl<'client, Gateway> IssueLookup<'client, Gateway>
where
    Gateway: IssueGateway + ?Sized,
{
    /// Create a lookup facade over the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Fetch an issue, short-circuiting without a request when any part of
    /// the coordinates is absent.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::MissingCoordinates`] for incomplete input and
    /// propagates gateway failures unchanged.
    pub async fn fetch(
        &self,
        organization: Option<&str>,
        repository: Option<&str>,
        number: Option<IssueNumber>,
    ) -> Result<IssueRecord, LookupError> {
        tracing::info!(
            "Looking up issue {}/{}#{}",
            organization.unwrap_or("<none>"),
            repository.unwrap_or("<none>"),
            number.map_or_else(|| "<none>".to_owned(), |issue| issue.to_string())
        );

        let coordinates = IssueCoordinates::from_parts(organization, repository, number)?;
        let record = self.client.issue(&coordinates).await?;
        tracing::debug!("Got issue info for {coordinates}: {record:?}");
        Ok(record)
    }
}
