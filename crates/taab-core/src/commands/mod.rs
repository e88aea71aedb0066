//! Built-in command handlers
//!
//! Handlers never fail. Anything that goes wrong becomes a message outcome.
//! A handler that mutates settings marks the context dirty; the dispatcher
//! persists once it returns.

mod config;
mod link;
mod set;

pub(crate) use config::imported_message;
pub(crate) use link::builtin_conflict;

use taab_navigation::{Command, Link, ALIASES};

use crate::outcome::{Navigation, Outcome};
use crate::settings::Settings;

pub(crate) struct CommandContext<'a> {
    pub settings: &'a mut Settings,
    /// Link waiting for overwrite confirmation
    pub pending_link: &'a mut Option<Link>,
    /// The trimmed input line, new-tab flag removed
    pub line: &'a str,
    pub new_tab: bool,
    pub dirty: bool,
}

impl CommandContext<'_> {
    pub fn navigate(&self, url: String) -> Outcome {
        Outcome::Navigate(Navigation {
            url,
            new_tab: self.new_tab || self.settings.always_new_tab,
        })
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

pub(crate) fn execute(command: Command, args: &[String], cx: &mut CommandContext<'_>) -> Outcome {
    tracing::debug!(command = %command, args = args.len(), "Executing command");

    match command {
        Command::Set => set::execute(args, cx),
        Command::Link => link::execute(args, cx),
        Command::Config => config::execute(args, cx),
        Command::Help => help(),
        Command::Google
        | Command::DuckDuckGo
        | Command::YouTube
        | Command::GitHub
        | Command::Maps
        | Command::Drive
        | Command::Calendar
        | Command::Gmail
        | Command::Keep
        | Command::Amazon
        | Command::CloudConsole
        | Command::Cloudflare
        | Command::ChatGpt
        | Command::Kubernetes
        | Command::Terraform
        | Command::Sheets
        | Command::Notion
        | Command::Zoom => match command.site() {
            Some(site) => cx.navigate(site.destination(args)),
            None => Outcome::Nothing,
        },
    }
}

fn help() -> Outcome {
    let mut lines: Vec<String> = Command::ALL
        .iter()
        .map(|command| format!("{} - {}", command.name(), command.description()))
        .collect();

    let aliases = ALIASES
        .iter()
        .map(|(alias, command)| format!("{alias} -> {command}"))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("aliases: {aliases}"));

    Outcome::message(lines.join("\n"), 30_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(command: Command, args: &[&str], settings: &mut Settings) -> (Outcome, bool) {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut pending = None;
        let mut cx = CommandContext {
            settings,
            pending_link: &mut pending,
            line: "",
            new_tab: false,
            dirty: false,
        };
        let outcome = execute(command, &args, &mut cx);
        (outcome, cx.dirty)
    }

    #[test]
    fn test_site_commands_navigate_without_mutation() {
        let mut settings = Settings::default();
        let (outcome, dirty) = run(Command::DuckDuckGo, &["rust", "async"], &mut settings);

        assert!(!dirty);
        assert_eq!(
            outcome,
            Outcome::Navigate(Navigation {
                url: "https://duckduckgo.com/?q=rust%20async".to_string(),
                new_tab: false,
            })
        );
    }

    #[test]
    fn test_always_new_tab_applies_to_sites() {
        let mut settings = Settings {
            always_new_tab: true,
            ..Settings::default()
        };
        let (outcome, _) = run(Command::Notion, &[], &mut settings);
        assert!(outcome.navigation().unwrap().new_tab);
    }

    #[test]
    fn test_help_lists_commands_and_aliases() {
        let mut settings = Settings::default();
        let (outcome, dirty) = run(Command::Help, &[], &mut settings);
        let text = &outcome.displayed().unwrap().text;

        assert!(!dirty);
        assert!(text.contains("link - add, show or delete shortcuts"));
        assert!(text.contains("? -> help"));
    }
}
