//! Database migration operations.

use issue_linker::persistence::SqliteRoomStore;
use issue_linker::telemetry::StderrJsonlTelemetrySink;
use issue_linker::{LinkerConfig, LinkerError};

/// Runs database migrations and reports the schema version on stderr.
///
/// # Errors
///
/// Returns [`LinkerError::Configuration`] if the database URL is missing or
/// blank, and [`LinkerError::Persistence`] for connection or migration
/// failures.
pub fn run(config: &LinkerConfig) -> Result<(), LinkerError> {
    let database_url =
        config
            .database_url
            .as_deref()
            .ok_or_else(|| LinkerError::Configuration {
                message: "database URL is required (use --database-url)".to_owned(),
            })?;

    let telemetry = StderrJsonlTelemetrySink;
    let version = SqliteRoomStore::new(database_url)?.migrate(&telemetry)?;
    tracing::info!("Database at {database_url} migrated to {}", version.as_str());
    Ok(())
}
