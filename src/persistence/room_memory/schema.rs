//! Schema management for the `room_memory` table.

use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::persistence::PersistenceError;

/// Migrations creating the room memory schema, embedded at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Version of the newest room memory migration.
pub const CURRENT_SCHEMA_VERSION: &str = "20261019000000";

/// Table holding one row per `(room_id, key)`.
pub(super) const ROOM_MEMORY_TABLE: &str = "room_memory";

/// Version of the room memory schema a database is at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaVersion(String);

impl SchemaVersion {
    /// Returns the migration version string, e.g. `20261019000000`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Applies pending migrations and confirms the `room_memory` table exists.
pub(super) fn bring_up_to_date(
    connection: &mut SqliteConnection,
) -> Result<SchemaVersion, PersistenceError> {
    connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| PersistenceError::MigrationFailed {
            message: error.to_string(),
        })?;

    let present = room_memory_exists(connection).map_err(|error| {
        PersistenceError::SchemaVersionQueryFailed {
            message: error.to_string(),
        }
    })?;
    if !present {
        return Err(PersistenceError::SchemaNotInitialised);
    }

    newest_applied_version(connection)
}

/// Highest migration version recorded as applied.
fn newest_applied_version(
    connection: &mut SqliteConnection,
) -> Result<SchemaVersion, PersistenceError> {
    let applied = connection.applied_migrations().map_err(|error| {
        PersistenceError::SchemaVersionQueryFailed {
            message: error.to_string(),
        }
    })?;

    applied
        .into_iter()
        .max()
        .map(|version| SchemaVersion(version.to_string()))
        .ok_or(PersistenceError::MissingSchemaVersion)
}

/// Whether the `room_memory` table has been created.
pub(super) fn room_memory_exists(
    connection: &mut SqliteConnection,
) -> Result<bool, diesel::result::Error> {
    #[derive(Debug, QueryableByName)]
    struct Row {
        #[diesel(sql_type = BigInt)]
        count: i64,
    }

    let row: Row = sql_query(
        "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?;",
    )
    .bind::<Text, _>(ROOM_MEMORY_TABLE)
    .get_result(connection)?;

    Ok(row.count > 0)
}
