//! The dispatcher and the state it owns
//!
//! Everything a line can change lives in [`Taab`]: the settings record, the
//! last entered command, the message slot and a pending overwrite. Dispatch
//! is synchronous; the host wraps the instance in [`SharedTaab`] so a remote
//! fetch can apply its result when it completes.

use parking_lot::Mutex;
use std::sync::Arc;

use taab_navigation::{build_url, AddLink, Command, InputResolution, InputResolver, Link};
use taab_storage::SettingsStore;

use crate::commands::{self, builtin_conflict, imported_message, CommandContext};
use crate::error::CoreError;
use crate::message::{Message, MessageSlot};
use crate::outcome::{Navigation, Outcome};
use crate::settings::{Settings, LEGACY_LINKS_KEY, SETTINGS_BACKUP_KEY, SETTINGS_KEY};
use crate::Result;

pub type SharedTaab<S> = Arc<Mutex<Taab<S>>>;

pub struct Taab<S: SettingsStore> {
    store: S,
    settings: Settings,
    resolver: InputResolver,
    last_command: Option<String>,
    messages: MessageSlot,
    /// Link waiting for the user to confirm an overwrite
    pending_link: Option<Link>,
}

impl<S: SettingsStore> Taab<S> {
    /// Load settings from `store`, migrating the legacy link list if present.
    ///
    /// The loaded state is written back so the stored record is always in
    /// the current format. A stored record that fails to parse is copied to
    /// [`SETTINGS_BACKUP_KEY`] and left untouched; defaults are used until
    /// the next change is committed.
    pub fn load(store: S) -> Result<Self> {
        let (mut settings, readable) = match store.get(SETTINGS_KEY)? {
            Some(json) => match Settings::from_json_over_defaults(&json) {
                Ok(settings) => (settings, true),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        backup = SETTINGS_BACKUP_KEY,
                        "Stored settings are unreadable, using defaults"
                    );
                    store.set(SETTINGS_BACKUP_KEY, &json)?;
                    (Settings::default(), false)
                }
            },
            None => (Settings::default(), true),
        };

        let migrated = match store.get(LEGACY_LINKS_KEY)? {
            Some(json) => match settings.import_legacy_links(&json) {
                Ok(count) => {
                    tracing::info!(links = count, "Migrated legacy links");
                    true
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Legacy links are unreadable, leaving them in place");
                    false
                }
            },
            None => false,
        };

        let taab = Self {
            store,
            settings,
            resolver: InputResolver::new(),
            last_command: None,
            messages: MessageSlot::new(),
            pending_link: None,
        };

        if readable || migrated {
            taab.commit()?;
        }
        if migrated {
            taab.store.remove(LEGACY_LINKS_KEY)?;
        }

        tracing::info!(
            links = taab.settings.links.len(),
            default_command = %taab.settings.default_command,
            "Loaded settings"
        );
        Ok(taab)
    }

    /// Resolve and execute one input line.
    pub fn dispatch(&mut self, input: &str) -> Outcome {
        let Some(resolved) = self.resolver.resolve(input, &self.settings.links) else {
            return Outcome::Nothing;
        };

        self.messages.clear();
        self.pending_link = None;
        self.last_command = Some(resolved.raw.clone());

        let new_tab = resolved.new_tab;
        let line = without_flag(&resolved.raw, new_tab);
        let outcome = match resolved.resolution {
            InputResolution::Builtin { command, args }
            | InputResolution::Aliased { command, args, .. } => {
                self.run_command(command, &args, line, new_tab)
            }
            InputResolution::LiteralUrl { url, .. } => {
                self.navigate(build_url(&url, "", ""), new_tab)
            }
            InputResolution::Link { link, args } => {
                self.navigate(link.destination(&args), new_tab)
            }
            InputResolution::DefaultFallback { args } => {
                match self.settings.default_command.parse::<Command>() {
                    Ok(command) => self.run_command(command, &args, line, new_tab),
                    Err(e) => {
                        tracing::warn!(error = %e, "Default command is not a command");
                        Outcome::message(
                            format!(
                                "Error: default command \"{}\" not found\nUse set;defaultCommand;<command> to fix it",
                                self.settings.default_command
                            ),
                            10_000,
                        )
                    }
                }
            }
        };

        self.display(&outcome);
        outcome
    }

    /// Answer the question from the last [`Outcome::Confirm`].
    pub fn confirm(&mut self, accepted: bool) -> Outcome {
        let Some(link) = self.pending_link.take() else {
            return Outcome::Nothing;
        };
        if !accepted {
            tracing::debug!(shortcut = %link.command, "Overwrite declined");
            return Outcome::Nothing;
        }

        let shortcut = link.command.clone();
        let added = format!("Added {link}");
        let outcome = match self.settings.links.confirm_overwrite(link) {
            AddLink::Added => self.committed(Outcome::message(added, 5000)),
            AddLink::Builtin | AddLink::NeedsConfirmation(_) => builtin_conflict(&shortcut),
        };

        self.display(&outcome);
        outcome
    }

    /// Apply a config blob fetched from gist `gist_id`.
    pub fn import_remote(&mut self, gist_id: &str, content: &str) -> Outcome {
        let outcome = match self.settings.import_json(content) {
            Ok(rejected) => {
                self.settings.gist_id = gist_id.to_string();
                tracing::info!(gist_id = %gist_id, rejected = rejected.len(), "Imported remote config");
                self.committed(imported_message(&rejected))
            }
            Err(e) => {
                tracing::warn!(gist_id = %gist_id, error = %e, "Failed to parse remote config");
                Outcome::message(format!("Error parsing config: {e}"), 5000)
            }
        };

        self.display(&outcome);
        outcome
    }

    pub fn show_message(&mut self, message: Message) {
        self.messages.show(message);
    }

    /// Persist the current settings record.
    pub fn commit(&self) -> Result<()> {
        let json = self.settings.to_json()?;
        self.store.set(SETTINGS_KEY, &json)?;
        tracing::debug!(bytes = json.len(), "Committed settings");
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The last non-blank line, trimmed
    pub fn last_command(&self) -> Option<&str> {
        self.last_command.as_deref()
    }

    pub fn messages(&self) -> &MessageSlot {
        &self.messages
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn has_pending_confirmation(&self) -> bool {
        self.pending_link.is_some()
    }

    fn run_command(
        &mut self,
        command: Command,
        args: &[String],
        line: &str,
        new_tab: bool,
    ) -> Outcome {
        let mut cx = CommandContext {
            settings: &mut self.settings,
            pending_link: &mut self.pending_link,
            line,
            new_tab,
            dirty: false,
        };
        let outcome = commands::execute(command, args, &mut cx);
        let dirty = cx.dirty;

        if dirty {
            self.committed(outcome)
        } else {
            outcome
        }
    }

    /// `outcome` if the commit succeeds, an error message otherwise. The
    /// in-memory change is kept either way.
    fn committed(&self, outcome: Outcome) -> Outcome {
        match self.commit() {
            Ok(()) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist settings");
                persist_failed(&e)
            }
        }
    }

    fn navigate(&self, url: String, new_tab: bool) -> Outcome {
        Outcome::Navigate(Navigation {
            url,
            new_tab: new_tab || self.settings.always_new_tab,
        })
    }

    fn display(&mut self, outcome: &Outcome) {
        if let Some(message) = outcome.displayed() {
            self.messages.show(message.clone());
        }
    }
}

/// The line as typed, minus a trailing new-tab flag.
fn without_flag(raw: &str, new_tab: bool) -> &str {
    if !new_tab {
        return raw;
    }
    raw.rsplit_once(';').map_or(raw, |(head, _)| head)
}

fn persist_failed(error: &CoreError) -> Outcome {
    Outcome::message(format!("Error saving settings: {error}"), 8000)
}
