//! Data models representing issues returned by the GitHub API.
//!
//! Types prefixed with `Api` are internal deserialisation targets that convert
//! into the public [`IssueRecord`]. Only the fields the linker renders are
//! retained; everything else in the GitHub payload is ignored.

use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Label attached to an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueLabel {
    /// Label name as shown on GitHub.
    pub name: String,
    /// Six hex digit background colour, without a leading `#`.
    pub color: String,
}

/// Milestone an issue is filed under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueMilestone {
    /// Milestone title.
    pub title: String,
}

/// Normalised issue data used to build replies.
///
/// Records are built fresh for every lookup and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueRecord {
    /// Issue number within its repository.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// API URL of the issue.
    pub url: String,
    /// Browser URL of the issue, used as the canonical link in replies.
    pub html_url: String,
    /// Labels in the order GitHub returned them.
    pub labels: Vec<IssueLabel>,
    /// Milestone, when one is assigned.
    pub milestone: Option<IssueMilestone>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiIssue {
    pub(crate) number: u64,
    pub(crate) title: String,
    pub(crate) url: String,
    pub(crate) html_url: String,
    #[serde(default)]
    pub(crate) labels: Vec<ApiLabel>,
    #[serde(default)]
    pub(crate) milestone: Option<ApiMilestone>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiLabel {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiMilestone {
    pub(crate) title: String,
}

impl From<ApiLabel> for IssueLabel {
    fn from(value: ApiLabel) -> Self {
        Self {
            name: value.name,
            color: value.color,
        }
    }
}

impl From<ApiMilestone> for IssueMilestone {
    fn from(value: ApiMilestone) -> Self {
        Self { title: value.title }
    }
}

impl From<ApiIssue> for IssueRecord {
    fn from(value: ApiIssue) -> Self {
        Self {
            number: value.number,
            title: value.title,
            url: value.url,
            html_url: value.html_url,
            labels: value.labels.into_iter().map(IssueLabel::from).collect(),
            milestone: value.milestone.map(IssueMilestone::from),
        }
    }
}
