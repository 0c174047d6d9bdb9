//! Identity wrappers for issue lookups.

use std::fmt;

use url::Url;

use super::error::LookupError;
use super::reference::IssueNumber;

/// Default GitHub REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Fully resolved issue coordinates: organisation, repository, and number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCoordinates {
    organization: String,
    repository: String,
    number: IssueNumber,
}

impl IssueCoordinates {
    /// Builds coordinates once every part is known.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::MissingCoordinates`] when any part is absent or
    /// blank.
    pub fn from_parts(
        organization: Option<&str>,
        repository: Option<&str>,
        number: Option<IssueNumber>,
    ) -> Result<Self, LookupError> {
        match (organization, repository, number) {
            (Some(org), Some(repo), Some(issue)) if !org.is_empty() && !repo.is_empty() => {
                Ok(Self {
                    organization: org.to_owned(),
                    repository: repo.to_owned(),
                    number: issue,
                })
            }
            _ => Err(LookupError::MissingCoordinates),
        }
    }

    /// Organisation owning the repository.
    #[must_use]
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Repository name.
    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Issue number.
    #[must_use]
    pub const fn number(&self) -> IssueNumber {
        self.number
    }

    /// REST path of the issue relative to the API base.
    #[must_use]
    pub fn issue_path(&self) -> String {
        format!(
            "/repos/{}/{}/issues/{}",
            self.organization, self.repository, self.number
        )
    }
}

impl fmt::Display for IssueCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.organization, self.repository, self.number)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Trims the token and rejects blank values.
    #[must_use]
    pub fn new(token: impl AsRef<str>) -> Option<Self> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PersonalAccessToken(..)")
    }
}

/// Parses and validates the API base URL.
///
/// # Errors
///
/// Returns [`LookupError::Configuration`] when the value is not an absolute
/// `http` or `https` URL.
pub fn parse_api_base(value: &str) -> Result<Url, LookupError> {
    let parsed = Url::parse(value.trim()).map_err(|error| LookupError::Configuration {
        message: format!("API base URL is invalid: {error}"),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(LookupError::Configuration {
            message: format!("API base URL must be an http(s) URL with a host: {value}"),
        });
    }

    Ok(parsed)
}
