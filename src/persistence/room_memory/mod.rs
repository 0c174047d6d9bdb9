//! Room memory backed by `SQLite`.
//!
//! Each call opens a short-lived connection. Trait calls run the Diesel work
//! on Tokio's blocking pool.

mod schema;

pub use schema::{CURRENT_SCHEMA_VERSION, MIGRATIONS, SchemaVersion};

use async_trait::async_trait;
use diesel::Connection;
use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;

use crate::room::{RoomId, RoomStore, StoreError};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

use super::PersistenceError;

/// [`RoomStore`] persisting values in the `room_memory` table.
#[derive(Debug, Clone)]
pub struct SqliteRoomStore {
    database_url: String,
}

impl SqliteRoomStore {
    /// Creates a store targeting `database_url` without touching the schema.
    ///
    /// Use [`SqliteRoomStore::open`] or [`SqliteRoomStore::migrate`] when the
    /// database may be new or outdated.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        let trimmed = database_url_string.trim();
        if trimmed.is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(Self {
            database_url: trimmed.to_owned(),
        })
    }

    /// Creates a store and brings its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the URL is blank or
    /// [`SqliteRoomStore::migrate`] fails.
    pub fn open(
        database_url: impl Into<String>,
        telemetry: &dyn TelemetrySink,
    ) -> Result<Self, PersistenceError> {
        let store = Self::new(database_url)?;
        store.migrate(telemetry)?;
        Ok(store)
    }

    /// Applies pending migrations, checks the `room_memory` table, and
    /// records the resulting schema version in telemetry.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened, a
    /// migration fails, or the schema is still missing afterwards.
    pub fn migrate(
        &self,
        telemetry: &dyn TelemetrySink,
    ) -> Result<SchemaVersion, PersistenceError> {
        let mut connection = self.establish_connection()?;
        let version = schema::bring_up_to_date(&mut connection)?;

        tracing::debug!(
            "room memory at {} is at schema {}",
            self.database_url,
            version.as_str()
        );
        telemetry.record(TelemetryEvent::SchemaVersionRecorded {
            schema_version: version.as_str().to_owned(),
        });
        Ok(version)
    }

    /// Reads one value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened, the
    /// schema is missing, or the query fails.
    pub fn read(&self, room: &RoomId, key: &str) -> Result<Option<String>, PersistenceError> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = Text)]
            value: String,
        }

        let mut connection = self.establish_connection()?;

        let row: Option<Row> =
            sql_query("SELECT value FROM room_memory WHERE room_id = ? AND key = ? LIMIT 1;")
                .bind::<Text, _>(room.as_str())
                .bind::<Text, _>(key)
                .get_result(&mut connection)
                .optional()
                .map_err(|error| {
                    classify(&mut connection, &error, |message| {
                        PersistenceError::QueryFailed { message }
                    })
                })?;

        Ok(row.map(|found| found.value))
    }

    /// Inserts or replaces one value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing or the write
    /// fails.
    pub fn write(&self, room: &RoomId, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.write_all(room, &[(key.to_owned(), value.to_owned())])
    }

    /// Inserts or replaces every `(key, value)` pair in one transaction.
    ///
    /// Either every pair is stored or none is.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing or any write
    /// fails; earlier writes in the batch are rolled back.
    pub fn write_all(
        &self,
        room: &RoomId,
        entries: &[(String, String)],
    ) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;

        connection
            .transaction::<(), diesel::result::Error, _>(|transaction| {
                for (key, value) in entries {
                    upsert(transaction, room, key, value)?;
                }
                Ok(())
            })
            .map_err(|error| {
                classify(&mut connection, &error, |message| {
                    PersistenceError::WriteFailed { message }
                })
            })
    }

    fn establish_connection(&self) -> Result<SqliteConnection, PersistenceError> {
        SqliteConnection::establish(&self.database_url).map_err(|error| {
            PersistenceError::ConnectionFailed {
                message: error.to_string(),
            }
        })
    }
}

fn upsert(
    connection: &mut SqliteConnection,
    room: &RoomId,
    key: &str,
    value: &str,
) -> Result<(), diesel::result::Error> {
    sql_query(
        "INSERT INTO room_memory (room_id, key, value) VALUES (?, ?, ?) \
         ON CONFLICT(room_id, key) DO UPDATE SET \
           value = excluded.value, \
           updated_at = CURRENT_TIMESTAMP;",
    )
    .bind::<Text, _>(room.as_str())
    .bind::<Text, _>(key)
    .bind::<Text, _>(value)
    .execute(connection)
    .map(drop)
}

/// Reports a missing table as [`PersistenceError::SchemaNotInitialised`] and
/// anything else through `otherwise`.
fn classify<F>(
    connection: &mut SqliteConnection,
    error: &diesel::result::Error,
    otherwise: F,
) -> PersistenceError
where
    F: FnOnce(String) -> PersistenceError,
{
    match schema::room_memory_exists(connection) {
        Ok(false) => PersistenceError::SchemaNotInitialised,
        Ok(true) => otherwise(error.to_string()),
        Err(check_error) => otherwise(format!(
            "schema presence check failed: {check_error}; original error: {error}"
        )),
    }
}

async fn on_blocking_pool<T, F>(task: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, PersistenceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|error| StoreError::Unavailable {
            message: format!("room memory task failed: {error}"),
        })?
        .map_err(StoreError::from)
}

#[async_trait]
impl RoomStore for SqliteRoomStore {
    async fn get(&self, room: &RoomId, key: &str) -> Result<Option<String>, StoreError> {
        let store = self.clone();
        let room_id = room.clone();
        let key_owned = key.to_owned();
        on_blocking_pool(move || store.read(&room_id, &key_owned)).await
    }

    async fn put(&self, room: &RoomId, key: &str, value: &str) -> Result<(), StoreError> {
        self.put_all(room, &[(key.to_owned(), value.to_owned())]).await
    }

    async fn put_all(
        &self,
        room: &RoomId,
        entries: &[(String, String)],
    ) -> Result<(), StoreError> {
        let store = self.clone();
        let room_id = room.clone();
        let batch = entries.to_vec();
        on_blocking_pool(move || store.write_all(&room_id, &batch)).await
    }
}

#[cfg(test)]
mod tests;
