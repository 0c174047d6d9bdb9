//! Tests for the `SQLite` room store.

type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

use diesel::Connection;
use diesel::connection::SimpleConnection;
use diesel::sqlite::SqliteConnection;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::{CURRENT_SCHEMA_VERSION, SqliteRoomStore};
use crate::persistence::PersistenceError;
use crate::room::{RoomDefaults, RoomId, RoomStore, StoreError};
use crate::telemetry::test_support::RecordingSink;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent};

#[fixture]
fn temp_db() -> FixtureResult<(TempDir, String)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("issue-linker.sqlite");
    Ok((temp_dir, db_path.to_string_lossy().into_owned()))
}

#[fixture]
fn migrated_store(
    temp_db: FixtureResult<(TempDir, String)>,
) -> FixtureResult<(TempDir, SqliteRoomStore)> {
    let (temp_dir, database_url) = temp_db?;
    let store = SqliteRoomStore::open(database_url, &NoopTelemetrySink)?;
    Ok((temp_dir, store))
}

fn lobby() -> RoomId {
    RoomId::new("!lobby:example.org")
}

/// Makes every write of `key` fail inside `SQLite`.
fn reject_writes_of(database_url: &str, key: &str) -> FixtureResult<()> {
    let mut connection = SqliteConnection::establish(database_url)?;
    connection.batch_execute(&format!(
        "CREATE TRIGGER reject_insert_{key} BEFORE INSERT ON room_memory \
         WHEN NEW.key = '{key}' BEGIN SELECT RAISE(ABORT, '{key} is read-only'); END; \
         CREATE TRIGGER reject_update_{key} BEFORE UPDATE ON room_memory \
         WHEN NEW.key = '{key}' BEGIN SELECT RAISE(ABORT, '{key} is read-only'); END;"
    ))?;
    Ok(())
}

#[rstest]
fn migrate_records_the_schema_version(temp_db: FixtureResult<(TempDir, String)>) {
    let (_temp_dir, database_url) = temp_db.expect("fixture should succeed");
    let store = SqliteRoomStore::new(database_url).expect("store should build");
    let telemetry = RecordingSink::default();

    let version = store.migrate(&telemetry).expect("migration should succeed");

    assert_eq!(version.as_str(), CURRENT_SCHEMA_VERSION);
    assert_eq!(
        telemetry.take(),
        vec![TelemetryEvent::SchemaVersionRecorded {
            schema_version: CURRENT_SCHEMA_VERSION.to_owned(),
        }]
    );
}

#[rstest]
fn migrating_twice_keeps_values_and_version(
    migrated_store: FixtureResult<(TempDir, SqliteRoomStore)>,
) {
    let (_temp_dir, store) = migrated_store.expect("fixture should succeed");
    store
        .write(&lobby(), "default_org", "acme")
        .expect("write should succeed");

    let version = store
        .migrate(&NoopTelemetrySink)
        .expect("second migration should succeed");

    assert_eq!(version.as_str(), CURRENT_SCHEMA_VERSION);
    assert_eq!(
        store.read(&lobby(), "default_org"),
        Ok(Some("acme".to_owned()))
    );
}

#[rstest]
fn migrating_a_directory_fails_to_connect(temp_db: FixtureResult<(TempDir, String)>) {
    let (temp_dir, _database_url) = temp_db.expect("fixture should succeed");
    let store = SqliteRoomStore::new(temp_dir.path().to_string_lossy().into_owned())
        .expect("store should build");

    let result = store.migrate(&NoopTelemetrySink);

    assert!(
        matches!(result, Err(PersistenceError::ConnectionFailed { .. })),
        "expected a connection failure, got {result:?}"
    );
}

#[rstest]
fn missing_key_reads_as_none(migrated_store: FixtureResult<(TempDir, SqliteRoomStore)>) {
    let (_temp_dir, store) = migrated_store.expect("fixture should succeed");

    assert_eq!(store.read(&lobby(), "default_org"), Ok(None));
}

#[rstest]
fn later_writes_replace_earlier_ones(migrated_store: FixtureResult<(TempDir, SqliteRoomStore)>) {
    let (_temp_dir, store) = migrated_store.expect("fixture should succeed");

    store
        .write(&lobby(), "default_repo", "widget")
        .expect("first write should succeed");
    store
        .write(&lobby(), "default_repo", "gadget")
        .expect("second write should succeed");

    assert_eq!(
        store.read(&lobby(), "default_repo"),
        Ok(Some("gadget".to_owned()))
    );
}

#[rstest]
fn values_are_scoped_per_room(migrated_store: FixtureResult<(TempDir, SqliteRoomStore)>) {
    let (_temp_dir, store) = migrated_store.expect("fixture should succeed");

    store
        .write(&lobby(), "default_org", "acme")
        .expect("write should succeed");

    assert_eq!(
        store.read(&RoomId::new("!dev:example.org"), "default_org"),
        Ok(None)
    );
}

#[rstest]
fn values_survive_reopening(migrated_store: FixtureResult<(TempDir, SqliteRoomStore)>) {
    let (temp_dir, store) = migrated_store.expect("fixture should succeed");
    store
        .write(&lobby(), "default_org", "acme")
        .expect("write should succeed");

    let database_url = temp_dir.path().join("issue-linker.sqlite");
    let reopened = SqliteRoomStore::new(database_url.to_string_lossy().into_owned())
        .expect("store should reopen");

    assert_eq!(
        reopened.read(&lobby(), "default_org"),
        Ok(Some("acme".to_owned()))
    );
}

#[rstest]
fn unmigrated_database_reports_schema_not_initialised(
    temp_db: FixtureResult<(TempDir, String)>,
) {
    let (_temp_dir, database_url) = temp_db.expect("fixture should succeed");
    let store = SqliteRoomStore::new(database_url).expect("store should build");

    assert_eq!(
        store.read(&lobby(), "default_org"),
        Err(PersistenceError::SchemaNotInitialised)
    );
    assert_eq!(
        store.write(&lobby(), "default_org", "acme"),
        Err(PersistenceError::SchemaNotInitialised)
    );
}

#[rstest]
#[case::empty("")]
#[case::whitespace("  ")]
fn blank_database_url_is_rejected(#[case] database_url: &str) {
    let telemetry = RecordingSink::default();

    assert!(matches!(
        SqliteRoomStore::open(database_url, &telemetry),
        Err(PersistenceError::BlankDatabaseUrl)
    ));
    assert!(telemetry.take().is_empty());
}

#[rstest]
fn failed_batch_write_rolls_back_every_entry(
    migrated_store: FixtureResult<(TempDir, SqliteRoomStore)>,
) {
    let (temp_dir, store) = migrated_store.expect("fixture should succeed");
    store
        .write_all(
            &lobby(),
            &[
                ("default_org".to_owned(), "old-org".to_owned()),
                ("default_repo".to_owned(), "old-repo".to_owned()),
            ],
        )
        .expect("initial write should succeed");
    let database_url = temp_dir.path().join("issue-linker.sqlite");
    reject_writes_of(&database_url.to_string_lossy(), "default_repo")
        .expect("trigger should install");

    let result = store.write_all(
        &lobby(),
        &[
            ("default_org".to_owned(), "acme".to_owned()),
            ("default_repo".to_owned(), "widget".to_owned()),
        ],
    );

    assert!(
        matches!(result, Err(PersistenceError::WriteFailed { .. })),
        "expected a write failure, got {result:?}"
    );
    assert_eq!(
        store.read(&lobby(), "default_org"),
        Ok(Some("old-org".to_owned()))
    );
    assert_eq!(
        store.read(&lobby(), "default_repo"),
        Ok(Some("old-repo".to_owned()))
    );
}

#[rstest]
#[tokio::test]
async fn room_defaults_round_trip_through_sqlite(
    migrated_store: FixtureResult<(TempDir, SqliteRoomStore)>,
) {
    let (_temp_dir, store) = migrated_store.expect("fixture should succeed");

    RoomDefaults::save(&store, &lobby(), "acme", "widget")
        .await
        .expect("save should succeed");

    let loaded = RoomDefaults::load(&store, &lobby()).await;
    assert_eq!(loaded.organization.as_deref(), Some("acme"));
    assert_eq!(loaded.repository.as_deref(), Some("widget"));
}

#[rstest]
#[tokio::test]
async fn rejected_save_keeps_previous_defaults(
    migrated_store: FixtureResult<(TempDir, SqliteRoomStore)>,
) {
    let (temp_dir, store) = migrated_store.expect("fixture should succeed");
    RoomDefaults::save(&store, &lobby(), "old-org", "old-repo")
        .await
        .expect("initial save should succeed");
    let database_url = temp_dir.path().join("issue-linker.sqlite");
    reject_writes_of(&database_url.to_string_lossy(), "default_repo")
        .expect("trigger should install");

    let result = RoomDefaults::save(&store, &lobby(), "acme", "widget").await;
    let loaded = RoomDefaults::load(&store, &lobby()).await;

    assert!(matches!(result, Err(StoreError::WriteRejected { .. })));
    assert_eq!(loaded.organization.as_deref(), Some("old-org"));
    assert_eq!(loaded.repository.as_deref(), Some("old-repo"));
}

#[rstest]
#[tokio::test]
async fn store_errors_surface_through_the_trait(temp_db: FixtureResult<(TempDir, String)>) {
    let (_temp_dir, database_url) = temp_db.expect("fixture should succeed");
    let store = SqliteRoomStore::new(database_url).expect("store should build");

    let result = store.put(&lobby(), "default_org", "acme").await;

    assert!(
        matches!(result, Err(StoreError::Unavailable { .. })),
        "missing schema should be unavailable, got {result:?}"
    );
}
