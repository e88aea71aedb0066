//! User-defined shortcuts
//!
//! The registry keeps insertion order and at most one entry per shortcut.
//! Every way into it (add, deserialization, `From<Vec<Link>>`) goes through
//! the same uniqueness rule: the first entry for a shortcut wins.

use serde::{Deserialize, Serialize};

use crate::command::is_reserved;

/// Shortcuts are matched against the lowercased command token.
pub fn normalize_shortcut(shortcut: &str) -> String {
    shortcut.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub command: String,
    pub url: String,
    #[serde(default)]
    pub search: String,
}

impl Link {
    pub fn new(command: &str, url: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            command: normalize_shortcut(command),
            url: url.into(),
            search: search.into(),
        }
    }

    /// Bare `url` without arguments, else `url + search + args` joined by
    /// spaces. The stored `search` is expected to be query-ready already, so
    /// nothing is encoded here.
    pub fn destination(&self, args: &[String]) -> String {
        if args.is_empty() {
            self.url.clone()
        } else {
            format!("{}{}{}", self.url, self.search, args.join(" "))
        }
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} --> {}", self.command, self.url)?;
        if !self.search.is_empty() {
            write!(f, " ({})", self.search)?;
        }
        Ok(())
    }
}

/// Result of [`LinkRegistry::add`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddLink {
    Added,
    /// Shortcut is a built-in command or alias; nothing changed
    Builtin,
    /// Shortcut already exists; pass the link to
    /// [`LinkRegistry::confirm_overwrite`] once the user agrees
    NeedsConfirmation(Link),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Link>", into = "Vec<Link>")]
pub struct LinkRegistry {
    links: Vec<Link>,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, shortcut: &str) -> Option<&Link> {
        let shortcut = normalize_shortcut(shortcut);
        self.links.iter().find(|link| link.command == shortcut)
    }

    pub fn contains(&self, shortcut: &str) -> bool {
        self.find(shortcut).is_some()
    }

    pub fn add(&mut self, link: Link) -> AddLink {
        if is_reserved(&link.command) {
            return AddLink::Builtin;
        }
        if self.contains(&link.command) {
            return AddLink::NeedsConfirmation(link);
        }

        tracing::info!(shortcut = %link.command, url = %link.url, "Added link");
        self.links.push(link);
        AddLink::Added
    }

    /// Delete-then-insert: the replaced shortcut moves to the end.
    pub fn confirm_overwrite(&mut self, link: Link) -> AddLink {
        if is_reserved(&link.command) {
            return AddLink::Builtin;
        }

        self.remove(&link.command);
        tracing::info!(shortcut = %link.command, url = %link.url, "Overwrote link");
        self.links.push(link);
        AddLink::Added
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, shortcut: &str) -> bool {
        let shortcut = normalize_shortcut(shortcut);
        let before = self.links.len();
        self.links.retain(|link| link.command != shortcut);
        before != self.links.len()
    }

    /// Drops entries that would be shadowed by a built-in, returning them.
    pub fn sanitize_builtins(&mut self) -> Vec<Link> {
        let (kept, dropped): (Vec<_>, Vec<_>) = std::mem::take(&mut self.links)
            .into_iter()
            .partition(|link| !is_reserved(&link.command));
        self.links = kept;
        for link in &dropped {
            tracing::warn!(shortcut = %link.command, "Dropped link shadowed by a builtin command");
        }
        dropped
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.links.iter()
    }

    pub fn list(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl From<Vec<Link>> for LinkRegistry {
    fn from(links: Vec<Link>) -> Self {
        let mut registry = Self::new();
        for mut link in links {
            link.command = normalize_shortcut(&link.command);
            if link.command.is_empty() {
                tracing::warn!(url = %link.url, "Ignoring link with an empty shortcut");
                continue;
            }
            if registry.contains(&link.command) {
                tracing::warn!(shortcut = %link.command, "Ignoring duplicate link");
                continue;
            }
            registry.links.push(link);
        }
        registry
    }
}

impl From<LinkRegistry> for Vec<Link> {
    fn from(registry: LinkRegistry) -> Self {
        registry.links
    }
}

impl<'a> IntoIterator for &'a LinkRegistry {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}
