//! Local persistence for room memory.
//!
//! Room memory can be kept in a local `SQLite` database so default
//! repositories survive restarts. The schema is managed with Diesel
//! migrations embedded in the binary.

mod error;
mod room_memory;

pub use error::PersistenceError;
pub use room_memory::{CURRENT_SCHEMA_VERSION, MIGRATIONS, SchemaVersion, SqliteRoomStore};
