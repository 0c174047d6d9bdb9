//! Test helpers for constructing `IssueRecord` fixtures.
//!
//! # Examples
//!
//! ```
//! use issue_linker::github::models::test_support::{issue_with_labels, minimal_issue};
//!
//! let issue = minimal_issue(13, "Widget explodes");
//! assert!(issue.labels.is_empty());
//!
//! let labelled = issue_with_labels(7, "Docs typo", &[("docs", "0075ca")]);
//! assert_eq!(labelled.labels.len(), 1);
//! ```

use super::{IssueLabel, IssueMilestone, IssueRecord};

/// Constructs an issue in `acme/widget` with no labels and no milestone.
#[must_use]
pub fn minimal_issue(number: u64, title: &str) -> IssueRecord {
    IssueRecord {
        number,
        title: title.to_owned(),
        url: format!("https://api.github.com/repos/acme/widget/issues/{number}"),
        html_url: format!("https://github.com/acme/widget/issues/{number}"),
        labels: Vec::new(),
        milestone: None,
    }
}

/// Constructs an issue carrying the given `(name, color)` labels.
#[must_use]
pub fn issue_with_labels(number: u64, title: &str, labels: &[(&str, &str)]) -> IssueRecord {
    IssueRecord {
        labels: labels
            .iter()
            .map(|(name, color)| IssueLabel {
                name: (*name).to_owned(),
                color: (*color).to_owned(),
            })
            .collect(),
        ..minimal_issue(number, title)
    }
}

/// Returns `issue` with its milestone set to `title`.
#[must_use]
pub fn with_milestone(issue: IssueRecord, title: &str) -> IssueRecord {
    IssueRecord {
        milestone: Some(IssueMilestone {
            title: title.to_owned(),
        }),
        ..issue
    }
}
