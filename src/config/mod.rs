//! Linker configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Lowest to highest:
//!
//! 1. **Defaults** built into the binary
//! 2. **Configuration file** `.issue-linker.toml` in the current directory,
//!    home directory, or XDG config directory
//! 3. **Environment variables** prefixed with `ISSUE_LINKER_`, plus the
//!    fallback `GITHUB_TOKEN`
//! 4. **Command-line arguments** such as `--token` and `--database-url`
//!
//! # Configuration File
//!
//! ```toml
//! api_base = "https://api.github.com"
//! token = "ghp_example"
//! request_timeout_seconds = 10
//! database_url = "issue-linker.sqlite"
//! room = "!ops:example.org"
//! user = "@alice:example.org"
//! rich_replies = true
//! send_notices = true
//! remind_missing_default = false
//! power_levels_path = "power_levels.json"
//! ```

use std::env;
use std::path::Path;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::{
    DEFAULT_API_BASE, DEFAULT_REQUEST_TIMEOUT, GatewaySettings, LookupError, PersonalAccessToken,
};
use crate::room::RoomId;
use crate::skill::{ChannelCapabilities, FormatError, LinkerOptions, SummaryTemplates, UserId};

/// Room used by the console host when none is configured.
pub const DEFAULT_CONSOLE_ROOM: &str = "!console:localhost";

/// User used by the console host when none is configured.
pub const DEFAULT_CONSOLE_USER: &str = "@console:localhost";

/// Linker configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use issue_linker::LinkerConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = LinkerConfig::load().expect("failed to load configuration");
/// let settings = config.gateway_settings().expect("API base should be valid");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "ISSUE_LINKER",
    discovery(
        dotfile_name = ".issue-linker.toml",
        config_file_name = "issue-linker.toml",
        app_name = "issue-linker"
    )
)]
pub struct LinkerConfig {
    /// GitHub REST API base URL.
    ///
    /// Defaults to `https://api.github.com`. Point it at a GitHub Enterprise
    /// instance or a mock server with `--api-base` or
    /// `ISSUE_LINKER_API_BASE`.
    #[ortho_config(cli_short = 'a')]
    pub api_base: Option<String>,

    /// Personal access token raising the anonymous rate limit.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `ISSUE_LINKER_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Connect and read timeout for each lookup, in seconds.
    ///
    /// Defaults to 10 seconds; zero selects the default.
    #[ortho_config(cli_short = 'T')]
    pub request_timeout_seconds: u64,

    /// Local `SQLite` database URL/path for room memory.
    ///
    /// Without one, room defaults live in memory for the life of the process.
    #[ortho_config(cli_short = 'd')]
    pub database_url: Option<String>,

    /// Runs database migrations and exits.
    #[ortho_config(cli_short = 'm')]
    pub migrate_db: bool,

    /// Room identity used by the console host.
    #[ortho_config(cli_short = 'r')]
    pub room: Option<String>,

    /// Sender identity used by the console host.
    #[ortho_config(cli_short = 'u')]
    pub user: Option<String>,

    /// Emit rich room events instead of plain replies.
    #[ortho_config(cli_short = 'R')]
    pub rich_replies: bool,

    /// Send rich replies as `m.notice` rather than `m.text`.
    #[ortho_config(cli_short = 'n')]
    pub send_notices: bool,

    /// Remind a room once when bare references cannot be resolved.
    #[ortho_config(cli_short = 'M')]
    pub remind_missing_default: bool,

    /// JSON file holding `m.room.power_levels` content.
    ///
    /// When set, `!github default_repo` is gated on the sender's level.
    #[ortho_config(cli_short = 'p')]
    pub power_levels_path: Option<String>,

    /// `MiniJinja` source replacing the plain summary template.
    #[ortho_config(cli_short = 'P')]
    pub plain_template: Option<String>,

    /// `MiniJinja` source replacing the rich summary template.
    #[ortho_config(cli_short = 'H')]
    pub rich_template: Option<String>,

    /// Write telemetry events to stderr as JSON lines.
    #[ortho_config(cli_short = 'e')]
    pub telemetry: bool,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            token: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            database_url: None,
            migrate_db: false,
            room: None,
            user: None,
            rich_replies: false,
            send_notices: false,
            remind_missing_default: false,
            power_levels_path: None,
            plain_template: None,
            rich_template: None,
            telemetry: false,
        }
    }
}

impl LinkerConfig {
    /// Configured API base, or the public GitHub API.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// Resolves the token from configuration or the `GITHUB_TOKEN`
    /// environment variable. Blank values count as absent.
    #[must_use]
    pub fn resolve_token(&self) -> Option<PersonalAccessToken> {
        self.token
            .as_deref()
            .and_then(PersonalAccessToken::new)
            .or_else(|| {
                env::var("GITHUB_TOKEN")
                    .ok()
                    .and_then(|value| PersonalAccessToken::new(&value))
            })
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        if self.request_timeout_seconds == 0 {
            DEFAULT_REQUEST_TIMEOUT
        } else {
            Duration::from_secs(self.request_timeout_seconds)
        }
    }

    /// Settings for the GitHub gateway.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Configuration`] when the API base is invalid.
    pub fn gateway_settings(&self) -> Result<GatewaySettings, LookupError> {
        Ok(GatewaySettings::anonymous(self.api_base())?
            .with_token(self.resolve_token())
            .with_timeout(self.request_timeout()))
    }

    /// Room the console host speaks in.
    #[must_use]
    pub fn room_id(&self) -> RoomId {
        RoomId::new(self.room.as_deref().unwrap_or(DEFAULT_CONSOLE_ROOM))
    }

    /// User the console host speaks as.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::new(self.user.as_deref().unwrap_or(DEFAULT_CONSOLE_USER))
    }

    /// Capabilities advertised for console messages.
    #[must_use]
    pub const fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            rich_replies: self.rich_replies,
            send_notices: self.send_notices,
            power_levels: self.power_levels_path.is_some(),
        }
    }

    /// Power level file, if configured.
    #[must_use]
    pub fn power_levels_path(&self) -> Option<&Path> {
        self.power_levels_path.as_deref().map(Path::new)
    }

    /// Linker behaviour derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidSyntax`] when a configured template
    /// fails to parse.
    pub fn linker_options(&self) -> Result<LinkerOptions, FormatError> {
        Ok(LinkerOptions {
            remind_missing_default: self.remind_missing_default,
            templates: SummaryTemplates::new(
                self.plain_template.clone(),
                self.rich_template.clone(),
            )?,
        })
    }
}

#[cfg(test)]
mod tests;
