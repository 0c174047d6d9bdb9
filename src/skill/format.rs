//! Issue summaries rendered with `MiniJinja`.
//!
//! Each issue is rendered twice: a plain form for text-only connectors and
//! the body of rich replies, and an HTML form for connectors that display
//! formatted bodies. Both forms are templates so hosts can restyle them.
//!
//! # Template variables
//!
//! - `title`: issue title
//! - `url`: canonical issue URL (the web page, not the API URL)
//! - `number`: issue number
//! - `labels`: list of `{ name, color }`, `color` being six hex digits
//! - `milestone`: milestone title, absent when the issue has none
//!
//! The rich template is rendered with HTML auto-escaping, so every variable
//! it prints is escaped, attribute values included. Use `| safe` to emit
//! trusted markup. The plain template is rendered verbatim.

use minijinja::{AutoEscape, Environment, context};
use thiserror::Error;

use crate::github::{IssueLabel, IssueRecord};

/// Default template for the plain form.
pub const DEFAULT_PLAIN_TEMPLATE: &str = concat!(
    "{{ title }} ({{ url }})",
    "{% if labels %} 🏷️",
    "{% for label in labels %}{{ label.name }}{% if not loop.last %} {% endif %}{% endfor %}",
    "{% endif %}",
    "{% if milestone %} 🪧{{ milestone }}{% endif %}",
);

/// Default template for the HTML form.
pub const DEFAULT_RICH_TEMPLATE: &str = concat!(
    "<a href=\"{{ url }}\">{{ title }}</a> #{{ number }} ",
    "{% if labels %}🏷️ ",
    "{% for label in labels %}",
    "<span data-mx-bg-color=#{{ label.color }}>{{ label.name }}</span>",
    "{% if not loop.last %} {% endif %}",
    "{% endfor %}",
    "{% endif %}",
    "{% if milestone %}🪧{{ milestone }}{% endif %}",
);

const PLAIN_NAME: &str = "plain";
const RICH_NAME: &str = "rich";

/// Errors raised while preparing or rendering summary templates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    /// A template source failed to parse.
    #[error("invalid {name} summary template: {message}")]
    InvalidSyntax {
        /// Which template failed (`plain` or `rich`).
        name: &'static str,
        /// Parser message from `MiniJinja`.
        message: String,
    },
    /// Rendering failed after successful parsing.
    #[error("summary rendering failed: {message}")]
    RenderFailed {
        /// Rendering failure from `MiniJinja`.
        message: String,
    },
}

/// Both renditions of one issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSummary {
    /// Plain text rendition.
    pub plain: String,
    /// HTML rendition.
    pub rich: String,
}

impl IssueSummary {
    /// Renders `record` with the default templates.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::RenderFailed`] when rendering fails.
    pub fn render(record: &IssueRecord) -> Result<Self, FormatError> {
        SummaryTemplates::default().render(record)
    }
}

/// The plain and rich template sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTemplates {
    plain: String,
    rich: String,
}

impl Default for SummaryTemplates {
    fn default() -> Self {
        Self {
            plain: DEFAULT_PLAIN_TEMPLATE.to_owned(),
            rich: DEFAULT_RICH_TEMPLATE.to_owned(),
        }
    }
}

impl SummaryTemplates {
    /// Uses the given sources, falling back to the defaults for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidSyntax`] when either source fails to
    /// parse.
    pub fn new(plain: Option<String>, rich: Option<String>) -> Result<Self, FormatError> {
        let templates = Self {
            plain: plain.unwrap_or_else(|| DEFAULT_PLAIN_TEMPLATE.to_owned()),
            rich: rich.unwrap_or_else(|| DEFAULT_RICH_TEMPLATE.to_owned()),
        };
        templates.environment().map(drop)?;
        Ok(templates)
    }

    /// Renders both forms of `record`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] when a template fails to parse or render.
    pub fn render(&self, record: &IssueRecord) -> Result<IssueSummary, FormatError> {
        let environment = self.environment()?;
        Ok(IssueSummary {
            plain: render_named(&environment, PLAIN_NAME, record)?,
            rich: render_named(&environment, RICH_NAME, record)?,
        })
    }

    fn environment(&self) -> Result<Environment<'_>, FormatError> {
        let mut environment = Environment::new();
        environment.set_auto_escape_callback(|name| {
            if name == RICH_NAME {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });

        environment
            .add_template(PLAIN_NAME, &self.plain)
            .map_err(|error| FormatError::InvalidSyntax {
                name: PLAIN_NAME,
                message: error.to_string(),
            })?;
        environment
            .add_template(RICH_NAME, &self.rich)
            .map_err(|error| FormatError::InvalidSyntax {
                name: RICH_NAME,
                message: error.to_string(),
            })?;

        Ok(environment)
    }
}

fn render_named(
    environment: &Environment<'_>,
    name: &str,
    record: &IssueRecord,
) -> Result<String, FormatError> {
    let template =
        environment
            .get_template(name)
            .map_err(|error| FormatError::RenderFailed {
                message: error.to_string(),
            })?;

    let labels: &[IssueLabel] = &record.labels;
    template
        .render(context! {
            title => record.title,
            url => record.html_url,
            number => record.number,
            labels => labels,
            milestone => record.milestone.as_ref().map(|milestone| milestone.title.as_str()),
        })
        .map_err(|error| FormatError::RenderFailed {
            message: error.to_string(),
        })
}
