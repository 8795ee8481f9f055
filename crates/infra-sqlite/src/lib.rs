// Jarvis Infrastructure - SQLite Adapter
// Implements: MemoryStore

mod connection;
mod memory_store;
mod migration;

pub use connection::create_pool;
pub use memory_store::SqliteMemoryStore;
pub use migration::run_migrations;

// Note: sqlx::Error conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
