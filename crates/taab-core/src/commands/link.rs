//! `link` shortcuts
//!
//! ```text
//! link;show
//! link;<shortcut>
//! link;<shortcut>;delete
//! link;<shortcut>;<url>[;<search>]
//! ```

use taab_navigation::{build_url, is_reserved, is_url, normalize_shortcut, AddLink, Link};

use super::CommandContext;
use crate::outcome::{Confirmation, Outcome};

const USAGE: &str = "Usage: link;<shortcut>;<url>[;<search>], link;<shortcut>;delete or link;show";

pub(super) fn execute(args: &[String], cx: &mut CommandContext<'_>) -> Outcome {
    match args {
        [] => Outcome::message(
            "link is a builtin command\nTo search for \"link\" try g;link",
            8000,
        ),
        [action] if action == "show" => show_all(cx),
        [shortcut] => describe(shortcut, cx),
        [shortcut, action] | [shortcut, action, _] if action == "delete" => delete(shortcut, cx),
        [shortcut, url] => add(shortcut, url, "", cx),
        [shortcut, url, search] => add(shortcut, url, search, cx),
        _ => Outcome::message(USAGE, 8000),
    }
}

fn show_all(cx: &CommandContext<'_>) -> Outcome {
    if cx.settings.links.is_empty() {
        return Outcome::message(format!("No links yet\n{USAGE}"), 8000);
    }

    let lines: Vec<String> = cx.settings.links.iter().map(Link::to_string).collect();
    Outcome::message(lines.join("\n"), 30_000)
}

fn describe(shortcut: &str, cx: &CommandContext<'_>) -> Outcome {
    match cx.settings.links.find(shortcut) {
        Some(link) => {
            let mut text = format!("\"{}\" links to {}", link.command, link.url);
            if !link.search.is_empty() {
                text.push_str(&format!(" ({})", link.search));
            }
            Outcome::message(text, 10_000)
        }
        None => Outcome::message(format!("No link named \"{shortcut}\""), 5000),
    }
}

fn delete(shortcut: &str, cx: &mut CommandContext<'_>) -> Outcome {
    if !cx.settings.links.remove(shortcut) {
        return Outcome::message(format!("No link named \"{shortcut}\""), 5000);
    }

    cx.mark_dirty();
    tracing::info!(shortcut = %shortcut, "Deleted link");
    Outcome::message(format!("Link {shortcut} deleted"), 5000)
}

fn add(shortcut: &str, url: &str, search: &str, cx: &mut CommandContext<'_>) -> Outcome {
    let shortcut = normalize_shortcut(shortcut);
    if shortcut.is_empty() {
        return Outcome::message("Error: shortcut cannot be empty", 5000);
    }
    if is_reserved(&shortcut) {
        return builtin_conflict(&shortcut);
    }

    let url = build_url(url, "", "");
    if !is_url(&url) {
        return Outcome::message("Invalid URL", 5000);
    }

    let link = Link::new(&shortcut, url, search);
    match cx.settings.links.add(link.clone()) {
        AddLink::Added => {
            cx.mark_dirty();
            Outcome::message(format!("Added {link}"), 5000)
        }
        AddLink::Builtin => builtin_conflict(&shortcut),
        AddLink::NeedsConfirmation(link) => {
            *cx.pending_link = Some(link);
            Outcome::Confirm(Confirmation {
                prompt: format!("Overwrite existing shortcut \"{shortcut}\"?"),
            })
        }
    }
}

pub(crate) fn builtin_conflict(shortcut: &str) -> Outcome {
    Outcome::message(format!("Cannot override builtin command: {shortcut}"), 5000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    struct Harness {
        settings: Settings,
        pending: Option<Link>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                settings: Settings::default(),
                pending: None,
            }
        }

        fn link(&mut self, args: &[&str]) -> (Outcome, bool) {
            let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
            let mut cx = CommandContext {
                settings: &mut self.settings,
                pending_link: &mut self.pending,
                line: "",
                new_tab: false,
                dirty: false,
            };
            let outcome = execute(&args, &mut cx);
            (outcome, cx.dirty)
        }
    }

    fn text(outcome: &Outcome) -> &str {
        &outcome.displayed().expect("message outcome").text
    }

    #[test]
    fn test_add_defaults_protocol_and_search() {
        let mut h = Harness::new();
        let (outcome, dirty) = h.link(&["Wiki", "wiki.example.com", "/search?q="]);

        assert!(dirty);
        assert_eq!(text(&outcome), "Added wiki --> http://wiki.example.com (/search?q=)");
        let link = h.settings.links.find("wiki").unwrap();
        assert_eq!(link.url, "http://wiki.example.com");
        assert_eq!(link.search, "/search?q=");

        h.link(&["rs", "https://docs.rs"]);
        assert_eq!(h.settings.links.find("rs").unwrap().search, "");
    }

    #[test]
    fn test_add_rejects_builtin_and_bad_urls() {
        let mut h = Harness::new();

        let (outcome, dirty) = h.link(&["g", "example.com"]);
        assert!(!dirty);
        assert_eq!(text(&outcome), "Cannot override builtin command: g");

        let (outcome, dirty) = h.link(&["cal", "example.com"]);
        assert!(!dirty);
        assert_eq!(text(&outcome), "Cannot override builtin command: cal");

        let (outcome, dirty) = h.link(&["x", "not a url"]);
        assert!(!dirty);
        assert_eq!(text(&outcome), "Invalid URL");

        let (outcome, _) = h.link(&["", "example.com"]);
        assert_eq!(text(&outcome), "Error: shortcut cannot be empty");

        assert!(h.settings.links.is_empty());
    }

    #[test]
    fn test_add_existing_needs_confirmation() {
        let mut h = Harness::new();
        h.link(&["wiki", "wiki.example.com"]);

        let (outcome, dirty) = h.link(&["wiki", "en.wikipedia.org"]);
        assert!(!dirty);
        assert!(matches!(outcome, Outcome::Confirm(_)));
        assert_eq!(h.pending.as_ref().unwrap().url, "http://en.wikipedia.org");
        assert_eq!(h.settings.links.find("wiki").unwrap().url, "http://wiki.example.com");
    }

    #[test]
    fn test_delete() {
        let mut h = Harness::new();
        h.link(&["wiki", "wiki.example.com"]);
        let before = serde_json::to_string(&h.settings.links).unwrap();

        let (outcome, dirty) = h.link(&["nope", "delete"]);
        assert!(!dirty);
        assert_eq!(text(&outcome), "No link named \"nope\"");
        assert_eq!(serde_json::to_string(&h.settings.links).unwrap(), before);

        let (outcome, dirty) = h.link(&["wiki", "delete"]);
        assert!(dirty);
        assert_eq!(text(&outcome), "Link wiki deleted");
        assert!(h.settings.links.is_empty());
    }

    #[test]
    fn test_show_and_describe() {
        let mut h = Harness::new();
        let (outcome, _) = h.link(&["show"]);
        assert!(text(&outcome).starts_with("No links yet"));

        h.link(&["wiki", "wiki.example.com", "/search?q="]);
        h.link(&["rs", "docs.rs"]);

        let (outcome, _) = h.link(&["show"]);
        assert_eq!(
            text(&outcome),
            "wiki --> http://wiki.example.com (/search?q=)\nrs --> http://docs.rs"
        );

        let (outcome, _) = h.link(&["rs"]);
        assert_eq!(text(&outcome), "\"rs\" links to http://docs.rs");

        let (outcome, _) = h.link(&["missing"]);
        assert_eq!(text(&outcome), "No link named \"missing\"");

        let (outcome, _) = h.link(&[]);
        assert!(text(&outcome).starts_with("link is a builtin command"));

        let (outcome, _) = h.link(&["a", "b", "c", "d"]);
        assert_eq!(text(&outcome), USAGE);
    }
}
