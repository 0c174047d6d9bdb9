//! Console host wiring.
//!
//! - [`console`]: the stdin/stdout message loop
//! - [`migrations`]: database schema migrations

use std::sync::Arc;

use issue_linker::persistence::SqliteRoomStore;
use issue_linker::skill::StaticPowerLevels;
use issue_linker::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use issue_linker::{
    IssueLinker, LinkerConfig, LinkerError, MemoryRoomStore, OctocrabIssueGateway, RoomStore,
};

pub mod console;
pub mod migrations;

/// Builds the linker described by `config`.
///
/// Must be called inside a Tokio runtime.
///
/// # Errors
///
/// Returns [`LinkerError`] when the gateway, room store, templates, or power
/// level file cannot be prepared.
pub fn build_linker(config: &LinkerConfig) -> Result<IssueLinker, LinkerError> {
    let telemetry = telemetry_sink(config);
    let gateway = OctocrabIssueGateway::from_settings(&config.gateway_settings()?)?;
    let store = open_store(config, telemetry.as_ref())?;

    let linker = IssueLinker::new(Arc::new(gateway), store)
        .with_telemetry(telemetry)
        .with_options(config.linker_options()?);

    let Some(path) = config.power_levels_path() else {
        return Ok(linker);
    };
    let levels = StaticPowerLevels::from_file(path)?;
    Ok(linker.with_power_levels(Arc::new(levels)))
}

fn telemetry_sink(config: &LinkerConfig) -> Arc<dyn TelemetrySink> {
    if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    }
}

/// Opens the `SQLite` store when a database is configured, migrating it
/// first; otherwise keeps room memory in process.
fn open_store(
    config: &LinkerConfig,
    telemetry: &dyn TelemetrySink,
) -> Result<Arc<dyn RoomStore>, LinkerError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::info!("No database configured; room defaults are kept in memory");
        return Ok(Arc::new(MemoryRoomStore::new()));
    };

    Ok(Arc::new(SqliteRoomStore::open(database_url, telemetry)?))
}
