//! taab Navigation
//!
//! Input line resolution, in precedence order:
//!   1. built-in command name
//!   2. alias of a built-in command
//!   3. literal URL
//!   4. user-defined link shortcut
//!   5. default command, with the whole line as its query
//!
//! Protocol: `command[;arg1[;arg2...]][;n]`, a trailing `n` opens a new tab.

mod builder;
mod classify;
mod command;
mod error;
mod input;
mod links;

pub use builder::{build_url, build_url_words, with_protocol};
pub use classify::is_url;
pub use command::{is_reserved, resolve_alias, Command, Payload, Site, ALIASES};
pub use error::NavigationError;
pub use input::{InputResolution, InputResolver, ParsedInput, Resolved};
pub use links::{normalize_shortcut, AddLink, Link, LinkRegistry};

pub type Result<T> = std::result::Result<T, NavigationError>;
