//! Persistence layer for Grounding Sun

mod connection;
mod kv_store;
mod migrations;

pub use connection::Database;
pub use kv_store::{KeyValueStore, MemoryStore};
pub use migrations::{run_app_migrations, MIGRATION_V1_FLAG};
