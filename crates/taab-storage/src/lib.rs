//! taab Storage Layer
//!
//! Settings are persisted as opaque string values under string keys.
//! The SQLite [`Database`] is the real backend; [`MemoryStore`] backs tests
//! and throwaway sessions.

mod database;
mod error;
mod memory;
mod migrations;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use store::SettingsStore;

pub type Result<T> = std::result::Result<T, StorageError>;
