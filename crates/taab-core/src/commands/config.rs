//! `config;export|import|open|fetch`

use regex::Regex;
use std::sync::OnceLock;

use super::CommandContext;
use crate::message::Message;
use crate::outcome::{Navigation, Outcome};

const USAGE: &str = "Usage: config;export, config;import;<json>, config;open or config;fetch[;<gist id>]";
const GIST_WEB: &str = "https://gist.github.com";

/// First run of 32 alphanumerics, so a full gist URL works too.
pub(crate) fn extract_gist_id(input: &str) -> Option<&str> {
    static GIST_ID: OnceLock<Regex> = OnceLock::new();
    GIST_ID
        .get_or_init(|| Regex::new(r"[0-9A-Za-z]{32}").expect("gist id pattern compiles"))
        .find(input)
        .map(|m| m.as_str())
}

pub(super) fn execute(args: &[String], cx: &mut CommandContext<'_>) -> Outcome {
    match args.first().map(String::as_str) {
        Some("export") => export(cx),
        Some("import") if args.len() > 1 => match import_remainder(cx.line) {
            Some(json) => import(json, cx),
            // `;` is the token separator, put back the ones inside the JSON
            None => import(&args[1..].join(";"), cx),
        },
        Some("import") => Outcome::message("Usage: config;import;<json>", 5000),
        Some("open") => open(cx),
        Some("fetch") => fetch(args.get(1).map(String::as_str), cx),
        _ => Outcome::message(USAGE, 8000),
    }
}

fn export(cx: &CommandContext<'_>) -> Outcome {
    match cx.settings.to_json() {
        Ok(json) => Outcome::message(json, 25_000),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize settings");
            Outcome::message(format!("Error exporting config: {e}"), 5000)
        }
    }
}

/// Everything after `config;import;`, untouched by tokenizing.
fn import_remainder(line: &str) -> Option<&str> {
    let mut parts = line.splitn(3, ';');
    parts.next()?;
    if parts.next()?.trim() != "import" {
        return None;
    }
    Some(parts.next()?.trim()).filter(|rest| !rest.is_empty())
}

fn import(json: &str, cx: &mut CommandContext<'_>) -> Outcome {
    match cx.settings.import_json(json) {
        Ok(rejected) => {
            cx.mark_dirty();
            tracing::info!(rejected = rejected.len(), "Imported config");
            imported_message(&rejected)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse imported config");
            Outcome::message(format!("Error parsing config: {e}"), 5000)
        }
    }
}

pub(crate) fn imported_message(rejected: &[String]) -> Outcome {
    if rejected.is_empty() {
        Outcome::message("Config imported", 5000)
    } else {
        Outcome::message(
            format!("Config imported, ignored invalid: {}", rejected.join(", ")),
            8000,
        )
    }
}

fn open(cx: &CommandContext<'_>) -> Outcome {
    if cx.settings.gist_id.is_empty() {
        return Outcome::message(
            "Error: No gist ID found. Make sure you have fetched your config at least once.",
            8000,
        );
    }

    Outcome::Navigate(Navigation {
        url: format!("{GIST_WEB}/{}", cx.settings.gist_id),
        new_tab: true,
    })
}

fn fetch(arg: Option<&str>, cx: &CommandContext<'_>) -> Outcome {
    let gist_id = match arg {
        Some(arg) => match extract_gist_id(arg) {
            Some(id) => id.to_string(),
            None => {
                return Outcome::message(
                    "Error: unable to parse gist ID.\nTry entering just the 32 character ID string.",
                    8000,
                )
            }
        },
        None if !cx.settings.gist_id.is_empty() => cx.settings.gist_id.clone(),
        None => return Outcome::message("Error: no gist ID", 5000),
    };

    Outcome::Fetch {
        gist_id,
        message: Message::new("Fetching gist...", 2500),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    const ID: &str = "0123456789abcdefABCDEF0123456789";

    fn config(args: &[&str], settings: &mut Settings) -> (Outcome, bool) {
        config_line(args, "", settings)
    }

    fn config_line(args: &[&str], line: &str, settings: &mut Settings) -> (Outcome, bool) {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut pending = None;
        let mut cx = CommandContext {
            settings,
            pending_link: &mut pending,
            line,
            new_tab: false,
            dirty: false,
        };
        let outcome = execute(&args, &mut cx);
        (outcome, cx.dirty)
    }

    #[test]
    fn test_extract_gist_id() {
        assert_eq!(extract_gist_id(ID), Some(ID));
        assert_eq!(
            extract_gist_id(&format!("https://gist.github.com/someone/{ID}")),
            Some(ID)
        );
        assert_eq!(extract_gist_id("tooshort"), None);
    }

    #[test]
    fn test_export_is_the_stored_json() {
        let mut settings = Settings::default();
        let (outcome, dirty) = config(&["export"], &mut settings);
        assert!(!dirty);
        assert_eq!(outcome.displayed().unwrap().text, settings.to_json().unwrap());
    }

    #[test]
    fn test_import_merges_and_restores_separators() {
        let mut settings = Settings::default();
        let (outcome, dirty) = config(
            &["import", r#"{"fontSize": "1em", "links": [{"command": "q", "url": "http://a.com", "search": "/?a=1"#, r#"b=2"}]}"#],
            &mut settings,
        );

        assert!(dirty);
        assert_eq!(outcome.displayed().unwrap().text, "Config imported");
        assert_eq!(settings.font_size, "1em");
        assert_eq!(settings.links.find("q").unwrap().search, "/?a=1;b=2");
    }

    #[test]
    fn test_import_keeps_spacing_around_separators() {
        let mut settings = Settings::default();
        let line = r#"config;import;{"links": [{"command": "q", "url": "http://a.com", "search": "/?a=1; b=2"}]}"#;
        let (outcome, dirty) = config_line(
            &["import", r#"{"links": [{"command": "q", "url": "http://a.com", "search": "/?a=1"#, r#"b=2"}]}"#],
            line,
            &mut settings,
        );

        assert!(dirty);
        assert_eq!(outcome.displayed().unwrap().text, "Config imported");
        assert_eq!(settings.links.find("q").unwrap().search, "/?a=1; b=2");
    }

    #[test]
    fn test_import_remainder() {
        assert_eq!(import_remainder(r#"config; import ;{"a": 1}"#), Some(r#"{"a": 1}"#));
        assert_eq!(import_remainder("config;import"), None);
        assert_eq!(import_remainder("config;import; "), None);
        assert_eq!(import_remainder("import;{}"), None);
    }

    #[test]
    fn test_import_malformed_changes_nothing() {
        let mut settings = Settings::default();
        let (outcome, dirty) = config(&["import", "{oops"], &mut settings);

        assert!(!dirty);
        assert!(outcome.displayed().unwrap().text.starts_with("Error parsing config"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_open() {
        let mut settings = Settings::default();
        let (outcome, _) = config(&["open"], &mut settings);
        assert!(outcome.displayed().unwrap().text.starts_with("Error: No gist ID"));

        settings.gist_id = ID.to_string();
        let (outcome, _) = config(&["open"], &mut settings);
        assert_eq!(
            outcome,
            Outcome::Navigate(Navigation {
                url: format!("https://gist.github.com/{ID}"),
                new_tab: true,
            })
        );
    }

    #[test]
    fn test_fetch() {
        let mut settings = Settings::default();

        let (outcome, _) = config(&["fetch"], &mut settings);
        assert_eq!(outcome.displayed().unwrap().text, "Error: no gist ID");

        let (outcome, _) = config(&["fetch", "nope"], &mut settings);
        assert!(outcome.displayed().unwrap().text.starts_with("Error: unable to parse gist ID"));

        let (outcome, dirty) = config(&["fetch", &format!("gist.github.com/me/{ID}")], &mut settings);
        assert!(!dirty);
        match outcome {
            Outcome::Fetch { gist_id, message } => {
                assert_eq!(gist_id, ID);
                assert_eq!(message.text, "Fetching gist...");
            }
            other => panic!("Expected Fetch, got {other:?}"),
        }

        settings.gist_id = ID.to_string();
        let (outcome, _) = config(&["fetch"], &mut settings);
        assert!(matches!(outcome, Outcome::Fetch { gist_id, .. } if gist_id == ID));
    }

    #[test]
    fn test_usage() {
        let mut settings = Settings::default();
        let (outcome, _) = config(&[], &mut settings);
        assert_eq!(outcome.displayed().unwrap().text, USAGE);
    }
}
