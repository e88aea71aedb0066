//! taab Core
//!
//! Settings, command execution and the dispatcher. [`Taab`] owns all state;
//! a host only feeds it lines and acts on the returned [`Outcome`].

mod clock;
mod commands;
mod config;
mod error;
mod message;
mod outcome;
mod remote;
mod settings;
mod taab;

pub use clock::{clock_text, current_clock};
pub use config::{Config, DEFAULT_GIST_API};
pub use error::CoreError;
pub use message::{Message, MessageSlot};
pub use outcome::{Confirmation, Navigation, Outcome};
pub use remote::{parse_gist_content, FetchSlot, GistClient, RemoteConfigLoader};
pub use settings::{Settings, LEGACY_LINKS_KEY, SETTINGS_BACKUP_KEY, SETTINGS_KEY};
pub use taab::{SharedTaab, Taab};

// Re-export core components
pub use taab_navigation::{
    Command, InputResolution, InputResolver, Link, LinkRegistry, NavigationError,
};
pub use taab_storage::{Database, MemoryStore, SettingsStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// Logs go to stderr; stdout belongs to the command line.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // a second call (tests, embedding hosts) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
