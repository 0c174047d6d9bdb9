//! The skill facade tying extraction, lookup, and replies together.

use std::sync::Arc;

use crate::github::{IssueGateway, IssueLookup, IssueNumber, extract_references};
use crate::room::{RoomDefaults, RoomStore, mark_reminder_sent, reminder_sent};
use crate::telemetry::{LookupOutcome, NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::channel::{OutgoingReply, ReplyChannel, channel_for};
use super::command::DefaultRepoCommand;
use super::configure::DefaultRepoConfigurator;
use super::format::SummaryTemplates;
use super::message::ChatMessage;
use super::permissions::PowerLevelSource;

/// Reminder sent once per room when a bare reference cannot be resolved.
pub const MISSING_DEFAULT_REMINDER: &str =
    "No default repo is set, use `!github default_repo org/repo` to set one.";

/// Behaviour switches for [`IssueLinker`].
#[derive(Debug, Clone, Default)]
pub struct LinkerOptions {
    /// Send a one-time reminder when a room has no default repository.
    pub remind_missing_default: bool,
    /// Templates used to render issue summaries.
    pub templates: SummaryTemplates,
}

/// Handles chat messages: links issue references and applies
/// `!github default_repo` commands.
///
/// Every message is handled independently; the room store is the only shared
/// state.
pub struct IssueLinker {
    gateway: Arc<dyn IssueGateway>,
    store: Arc<dyn RoomStore>,
    power_levels: Option<Arc<dyn PowerLevelSource>>,
    telemetry: Arc<dyn TelemetrySink>,
    options: LinkerOptions,
}

impl IssueLinker {
    /// Creates a linker with default options and no telemetry.
    #[must_use]
    pub fn new(gateway: Arc<dyn IssueGateway>, store: Arc<dyn RoomStore>) -> Self {
        Self {
            gateway,
            store,
            power_levels: None,
            telemetry: Arc::new(NoopTelemetrySink),
            options: LinkerOptions::default(),
        }
    }

    /// Sets the source consulted before default repository changes.
    #[must_use]
    pub fn with_power_levels(self, power_levels: Arc<dyn PowerLevelSource>) -> Self {
        Self {
            power_levels: Some(power_levels),
            ..self
        }
    }

    /// Sets the telemetry sink receiving lookup outcomes.
    #[must_use]
    pub fn with_telemetry(self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self { telemetry, ..self }
    }

    /// Replaces the behaviour switches.
    #[must_use]
    pub fn with_options(self, options: LinkerOptions) -> Self {
        Self { options, ..self }
    }

    /// Processes one message and returns the replies to post, in order.
    ///
    /// A message starting with `!github default_repo org/repo` is treated as
    /// a command and is not scanned for references.
    pub async fn handle(&self, message: &ChatMessage) -> Vec<OutgoingReply> {
        if let Some(command) = DefaultRepoCommand::parse(&message.text) {
            return vec![self.configure(message, &command).await];
        }
        self.link(message).await
    }

    async fn configure(
        &self,
        message: &ChatMessage,
        command: &DefaultRepoCommand,
    ) -> OutgoingReply {
        let configurator =
            DefaultRepoConfigurator::new(self.store.as_ref(), self.power_levels.as_deref());
        let outcome = configurator
            .set_default(
                &message.room,
                &message.user,
                command,
                message.capabilities.power_levels,
            )
            .await;

        let text = match outcome {
            Ok(()) => format!(
                "Set default repo to {}/{}",
                command.organization, command.repository
            ),
            Err(error) => error.to_string(),
        };
        OutgoingReply::Message { text }
    }

    async fn link(&self, message: &ChatMessage) -> Vec<OutgoingReply> {
        let references = extract_references(&message.text);
        if references.is_empty() {
            return Vec::new();
        }
        tracing::debug!("Found {} issue reference(s) in {}", references.len(), message.room);

        let defaults = RoomDefaults::load(self.store.as_ref(), &message.room).await;
        let channel = channel_for(message.capabilities);
        let lookup = IssueLookup::new(self.gateway.as_ref());
        let mut reminded = false;
        let mut replies = Vec::with_capacity(references.len());

        for reference in &references {
            let (Some(organization), Some(repository)) = defaults.resolve(reference) else {
                tracing::debug!("No default repository for {reference} in {}", message.room);
                if !reminded && let Some(reminder) = self.missing_default_reminder(message).await {
                    replies.push(reminder);
                }
                reminded = true;
                continue;
            };

            let target = Target {
                organization,
                repository,
                number: reference.issue_number(),
            };
            replies.push(
                self.link_one(message, channel.as_ref(), &lookup, &target)
                    .await,
            );
        }

        replies
    }

    async fn link_one(
        &self,
        message: &ChatMessage,
        channel: &dyn ReplyChannel,
        lookup: &IssueLookup<'_, dyn IssueGateway>,
        target: &Target<'_>,
    ) -> OutgoingReply {
        let result = lookup
            .fetch(
                Some(target.organization),
                Some(target.repository),
                Some(target.number),
            )
            .await;

        let outcome = match &result {
            Ok(_) => LookupOutcome::Found,
            Err(error) => LookupOutcome::from_error(error),
        };
        self.telemetry.record(TelemetryEvent::IssueLookupRecorded {
            reference: target.to_string(),
            outcome,
        });

        let record = match result {
            Ok(record) => record,
            Err(error) => {
                if error.is_transient() {
                    tracing::warn!("Lookup of {target} failed transiently: {error}");
                } else {
                    tracing::debug!("Lookup of {target} failed: {error}");
                }
                return lookup_failed(message, target);
            }
        };

        match self.options.templates.render(&record) {
            Ok(summary) => channel.issue_reply(message, &summary),
            Err(error) => {
                tracing::error!("Failed to render summary for {target}: {error}");
                lookup_failed(message, target)
            }
        }
    }

    async fn missing_default_reminder(&self, message: &ChatMessage) -> Option<OutgoingReply> {
        if !self.options.remind_missing_default
            || reminder_sent(self.store.as_ref(), &message.room).await
        {
            return None;
        }

        if let Err(error) = mark_reminder_sent(self.store.as_ref(), &message.room).await {
            tracing::warn!("Failed to record reminder for {}: {error}", message.room);
        }

        Some(OutgoingReply::Reply {
            text: MISSING_DEFAULT_REMINDER.to_owned(),
            in_reply_to: message.event_id.clone(),
        })
    }
}

fn lookup_failed(message: &ChatMessage, target: &Target<'_>) -> OutgoingReply {
    OutgoingReply::Reply {
        text: format!("Couldn't lookup {target}."),
        in_reply_to: message.event_id.clone(),
    }
}

/// A reference with every part resolved.
struct Target<'a> {
    organization: &'a str,
    repository: &'a str,
    number: IssueNumber,
}

impl std::fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.organization, self.repository, self.number)
    }
}
