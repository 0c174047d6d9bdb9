//! The `!github default_repo org/repo` command.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::github::reference::{ORGANIZATION_PATTERN, PATTERN_SIZE_LIMIT, REPOSITORY_PATTERN};

/// Command prefix recognised at the start of a message.
pub const DEFAULT_REPO_COMMAND: &str = "!github default_repo";

static COMMAND_PATTERN: LazyLock<Regex> = LazyLock::new(build_command_pattern);

#[expect(
    clippy::expect_used,
    reason = "the pattern is a constant exercised by the command tests"
)]
fn build_command_pattern() -> Regex {
    let pattern = format!(
        r"^{DEFAULT_REPO_COMMAND} (?P<organization>{ORGANIZATION_PATTERN})/(?P<repository>{REPOSITORY_PATTERN})"
    );
    RegexBuilder::new(&pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .expect("default repo command pattern should compile")
}

/// A parsed request to change the room's default repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRepoCommand {
    /// Requested default organisation.
    pub organization: String,
    /// Requested default repository.
    pub repository: String,
}

impl DefaultRepoCommand {
    /// Parses `text` when it starts with the command; trailing text is
    /// ignored.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let captures = COMMAND_PATTERN.captures(text)?;
        Some(Self {
            organization: captures.name("organization")?.as_str().to_owned(),
            repository: captures.name("repository")?.as_str().to_owned(),
        })
    }
}
