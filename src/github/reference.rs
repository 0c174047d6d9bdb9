//! Detection of GitHub-style issue references in free-form chat text.
//!
//! A reference is an optional `organization/repository` prefix followed by
//! `#<number>`, for example `acme/widget#13` or a bare `#13`. The grammar is:
//!
//! - `organization`: 1–39 ASCII alphanumerics with interior hyphens, never
//!   starting or ending with a hyphen.
//! - `repository`: 1–100 word characters, `.` or `-`.
//! - `issue_number`: 1–10 digits without a leading zero, ending on a word
//!   boundary.
//!
//! A reference must not follow a word character, so `abc#1` is not a
//! reference. The `regex` crate has no look-behind, so that rule runs as a
//! filter over each candidate. A rejected candidate resumes the scan one
//! character after its start, which yields the same matches as a look-behind
//! engine would.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex, RegexBuilder};

/// Organisation (GitHub user or org login) pattern.
pub(crate) const ORGANIZATION_PATTERN: &str = r"[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,37}[a-zA-Z0-9])?";

/// Repository name pattern.
pub(crate) const REPOSITORY_PATTERN: &str = r"[\w.-]{1,100}";

/// Room for the Unicode `\w` class repeated up to 100 times.
pub(crate) const PATTERN_SIZE_LIMIT: usize = 1 << 25;

static ISSUE_PATTERN: LazyLock<Regex> = LazyLock::new(build_issue_pattern);

#[expect(
    clippy::expect_used,
    reason = "the pattern is a constant exercised by the reference tests"
)]
fn build_issue_pattern() -> Regex {
    let pattern = format!(
        r"(?:(?P<organization>{ORGANIZATION_PATTERN})/(?P<repository>{REPOSITORY_PATTERN}))?#(?P<issue_number>[1-9][0-9]{{0,9}})\b"
    );
    RegexBuilder::new(&pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .expect("issue reference pattern should compile")
}

/// Issue number parsed from a reference; always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Wraps a positive issue number, rejecting zero.
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single issue reference found in a message.
///
/// Organisation and repository are either both present or both absent; an
/// absent pair is filled from the room defaults before lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReference {
    organization: Option<String>,
    repository: Option<String>,
    issue_number: IssueNumber,
}

impl IssueReference {
    /// Builds a reference from already-validated parts.
    #[must_use]
    pub const fn new(
        organization: Option<String>,
        repository: Option<String>,
        issue_number: IssueNumber,
    ) -> Self {
        Self {
            organization,
            repository,
            issue_number,
        }
    }

    /// Organisation written in the message, if any.
    #[must_use]
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    /// Repository written in the message, if any.
    #[must_use]
    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    /// Referenced issue number.
    #[must_use]
    pub const fn issue_number(&self) -> IssueNumber {
        self.issue_number
    }

    fn from_captures(captures: &Captures<'_>) -> Option<Self> {
        let issue_number = captures
            .name("issue_number")?
            .as_str()
            .parse::<u64>()
            .ok()
            .and_then(IssueNumber::new)?;

        Some(Self {
            organization: captures
                .name("organization")
                .map(|found| found.as_str().to_owned()),
            repository: captures
                .name("repository")
                .map(|found| found.as_str().to_owned()),
            issue_number,
        })
    }
}

impl fmt::Display for IssueReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.organization, &self.repository) {
            (Some(organization), Some(repository)) => {
                write!(f, "{organization}/{repository}#{}", self.issue_number)
            }
            _ => write!(f, "#{}", self.issue_number),
        }
    }
}

/// Returns every issue reference in `text`, left to right, without overlaps.
#[must_use]
pub fn extract_references(text: &str) -> Vec<IssueReference> {
    let mut references = Vec::new();
    let mut cursor = 0;

    while let Some(captures) = ISSUE_PATTERN.captures_at(text, cursor) {
        let Some(whole) = captures.get(0) else {
            break;
        };

        if starts_clear_of_word(text, whole.start()) {
            if let Some(reference) = IssueReference::from_captures(&captures) {
                references.push(reference);
            }
            cursor = whole.end();
        } else {
            cursor = next_char_boundary(text, whole.start());
        }
    }

    references
}

fn is_word_char(candidate: char) -> bool {
    candidate.is_alphanumeric() || candidate == '_'
}

fn starts_clear_of_word(text: &str, start: usize) -> bool {
    text.get(..start)
        .and_then(|before| before.chars().next_back())
        .is_none_or(|previous| !is_word_char(previous))
}

fn next_char_boundary(text: &str, position: usize) -> usize {
    text.get(position..)
        .and_then(|rest| rest.chars().next())
        .map_or(text.len(), |current| position + current.len_utf8())
}
