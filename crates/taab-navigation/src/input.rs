//! Input resolution for the command line
//!
//! Resolution is stateless: the only inputs are the raw line and the link
//! registry. Executing the result is up to the caller.

use crate::classify::is_url;
use crate::command::{resolve_alias, Command};
use crate::links::{Link, LinkRegistry};

const SEPARATOR: char = ';';
const NEW_TAB_FLAG: &str = "n";

/// A tokenized, non-empty input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    /// The trimmed line as typed
    pub raw: String,
    /// Trimmed tokens; index 0 keeps its original case
    pub tokens: Vec<String>,
    /// Lowercased first token
    pub candidate: String,
    pub new_tab: bool,
}

impl ParsedInput {
    /// Returns `None` for blank input.
    pub fn parse(input: &str) -> Option<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return None;
        }

        let mut tokens: Vec<String> = raw
            .split(SEPARATOR)
            .map(|token| token.trim().to_string())
            .collect();

        // The command token itself is never the flag.
        let new_tab = tokens.len() > 1 && tokens.last().map(String::as_str) == Some(NEW_TAB_FLAG);
        if new_tab {
            tokens.pop();
        }

        let candidate = tokens[0].to_lowercase();

        Some(Self {
            raw: raw.to_string(),
            tokens,
            candidate,
            new_tab,
        })
    }

    fn args(&self) -> Vec<String> {
        self.tokens[1..].to_vec()
    }
}

/// What a line means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResolution {
    Builtin {
        command: Command,
        args: Vec<String>,
    },
    Aliased {
        alias: String,
        command: Command,
        args: Vec<String>,
    },
    LiteralUrl {
        url: String,
        args: Vec<String>,
    },
    Link {
        link: Link,
        args: Vec<String>,
    },
    /// `args` is the whole token list, command token included
    DefaultFallback { args: Vec<String> },
}

impl InputResolution {
    pub fn args(&self) -> &[String] {
        match self {
            InputResolution::Builtin { args, .. }
            | InputResolution::Aliased { args, .. }
            | InputResolution::LiteralUrl { args, .. }
            | InputResolution::Link { args, .. }
            | InputResolution::DefaultFallback { args } => args,
        }
    }

    /// The built-in command to run, if the line named one directly or via alias
    pub fn command(&self) -> Option<Command> {
        match self {
            InputResolution::Builtin { command, .. } | InputResolution::Aliased { command, .. } => {
                Some(*command)
            }
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            InputResolution::Builtin { .. } => "builtin",
            InputResolution::Aliased { .. } => "alias",
            InputResolution::LiteralUrl { .. } => "url",
            InputResolution::Link { .. } => "link",
            InputResolution::DefaultFallback { .. } => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub raw: String,
    pub resolution: InputResolution,
    pub new_tab: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputResolver;

impl InputResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a raw line. Blank input resolves to `None`.
    pub fn resolve(&self, input: &str, links: &LinkRegistry) -> Option<Resolved> {
        let parsed = ParsedInput::parse(input)?;
        let resolution = self.classify(&parsed, links);

        tracing::debug!(
            kind = resolution.kind(),
            new_tab = parsed.new_tab,
            "Resolved input"
        );

        Some(Resolved {
            raw: parsed.raw,
            resolution,
            new_tab: parsed.new_tab,
        })
    }

    fn classify(&self, parsed: &ParsedInput, links: &LinkRegistry) -> InputResolution {
        let candidate = parsed.candidate.as_str();

        if let Some(command) = Command::from_name(candidate) {
            return InputResolution::Builtin {
                command,
                args: parsed.args(),
            };
        }

        if let Some(command) = resolve_alias(candidate) {
            return InputResolution::Aliased {
                alias: candidate.to_string(),
                command,
                args: parsed.args(),
            };
        }

        if is_url(candidate) {
            // paths and queries are case-sensitive, navigate to the token as typed
            return InputResolution::LiteralUrl {
                url: parsed.tokens[0].clone(),
                args: parsed.args(),
            };
        }

        if let Some(link) = links.find(candidate) {
            return InputResolution::Link {
                link: link.clone(),
                args: parsed.args(),
            };
        }

        InputResolution::DefaultFallback {
            args: parsed.tokens.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn wiki_registry() -> LinkRegistry {
        LinkRegistry::from(vec![Link::new(
            "wiki",
            "http://wiki.example.com",
            "/search?q=",
        )])
    }

    fn resolve(input: &str) -> Resolved {
        InputResolver::new()
            .resolve(input, &wiki_registry())
            .expect("non-blank input")
    }

    #[test]
    fn test_blank_input() {
        let resolver = InputResolver::new();
        let links = wiki_registry();
        assert!(resolver.resolve("", &links).is_none());
        assert!(resolver.resolve("   \t ", &links).is_none());
    }

    #[test]
    fn test_parse_tokens() {
        let parsed = ParsedInput::parse("  G ; rust  ;  borrow checker ").unwrap();
        assert_eq!(parsed.raw, "G ; rust  ;  borrow checker");
        assert_eq!(parsed.candidate, "g");
        assert_eq!(parsed.tokens, strings(&["G", "rust", "borrow checker"]));
        assert!(!parsed.new_tab);
    }

    #[test]
    fn test_resolve_builtin() {
        let resolved = resolve("G;rust");
        assert_eq!(
            resolved.resolution,
            InputResolution::Builtin {
                command: Command::Google,
                args: strings(&["rust"]),
            }
        );
    }

    #[test]
    fn test_alias_matches_canonical() {
        for (alias, command) in crate::command::ALIASES {
            let via_alias = resolve(&format!("{alias};x"));
            let direct = resolve(&format!("{};x", command.name()));

            assert_eq!(via_alias.resolution.command(), direct.resolution.command());
            assert_eq!(via_alias.resolution.args(), direct.resolution.args());
            assert_eq!(via_alias.resolution.kind(), "alias");
        }
    }

    #[test]
    fn test_builtins_beat_links() {
        // A registry that somehow holds a builtin name still loses.
        let links: LinkRegistry = serde_json::from_str(
            r#"[{"command": "g", "url": "http://shadow.example.com", "search": ""}]"#,
        )
        .unwrap();
        for command in Command::ALL {
            let resolved = InputResolver::new()
                .resolve(command.name(), &links)
                .unwrap();
            assert_eq!(
                resolved.resolution,
                InputResolution::Builtin {
                    command,
                    args: vec![],
                }
            );
        }
    }

    #[test]
    fn test_resolve_literal_url_keeps_case() {
        let resolved = resolve("GitHub.com/Rust-Lang;ignored");
        assert_eq!(
            resolved.resolution,
            InputResolution::LiteralUrl {
                url: "GitHub.com/Rust-Lang".to_string(),
                args: strings(&["ignored"]),
            }
        );
    }

    #[test]
    fn test_resolve_link() {
        let resolved = resolve("WIKI;foo bar");
        match resolved.resolution {
            InputResolution::Link { link, args } => {
                assert_eq!(link.command, "wiki");
                assert_eq!(args, strings(&["foo bar"]));
            }
            other => panic!("Expected Link, got {other:?}"),
        }
    }

    #[test]
    fn test_fallback_keeps_command_token() {
        let resolved = resolve("rust borrow checker;docs");
        assert_eq!(
            resolved.resolution,
            InputResolution::DefaultFallback {
                args: strings(&["rust borrow checker", "docs"]),
            }
        );
    }

    #[test]
    fn test_new_tab_flag_stripped_before_fallback() {
        let resolved = resolve("foo bar;n");
        assert!(resolved.new_tab);
        assert_eq!(
            resolved.resolution,
            InputResolution::DefaultFallback {
                args: strings(&["foo bar"]),
            }
        );

        let resolved = resolve("wiki;n");
        assert!(resolved.new_tab);
        assert!(resolved.resolution.args().is_empty());
    }

    #[test]
    fn test_new_tab_flag_only_when_last() {
        let resolved = resolve("g;n;rust");
        assert!(!resolved.new_tab);
        assert_eq!(resolved.resolution.args(), strings(&["n", "rust"]).as_slice());

        // A lone `n` is the notion command, not a flag.
        let resolved = resolve("n");
        assert!(!resolved.new_tab);
        assert_eq!(resolved.resolution.command(), Some(Command::Notion));

        // Only an exact `n` counts.
        let resolved = resolve("g;N");
        assert!(!resolved.new_tab);
    }
}
