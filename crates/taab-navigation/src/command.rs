//! Built-in command table
//!
//! The set is fixed at compile time. Site commands carry their destination
//! as data; `set`, `link`, `config` and `help` are handled by the core.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::builder::{build_url, build_url_words};
use crate::error::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Set,
    Link,
    Config,
    Help,
    Google,
    DuckDuckGo,
    YouTube,
    GitHub,
    Maps,
    Drive,
    Calendar,
    Gmail,
    Keep,
    Amazon,
    CloudConsole,
    Cloudflare,
    ChatGpt,
    Kubernetes,
    Terraform,
    Sheets,
    Notion,
    Zoom,
}

/// Alternate names, `alias -> command`.
pub const ALIASES: &[(&str, Command)] = &[
    ("cal", Command::Calendar),
    ("gk", Command::Keep),
    ("ddg", Command::DuckDuckGo),
    ("?", Command::Help),
];

/// How a site command turns its arguments into a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Arguments joined with spaces, percent-encoded
    Words,
    /// Only the first argument, percent-encoded
    FirstArg,
    /// Arguments concatenated as-is
    Raw,
    /// Arguments ignored
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    pub url: &'static str,
    pub search: &'static str,
    pub payload: Payload,
    /// Keyword arguments that jump to a fixed path instead of searching
    pub paths: &'static [(&'static str, &'static str)],
}

impl Site {
    const fn new(url: &'static str, search: &'static str, payload: Payload) -> Self {
        Self {
            url,
            search,
            payload,
            paths: &[],
        }
    }

    pub fn destination(&self, args: &[String]) -> String {
        let Some(first) = args.first() else {
            return self.url.to_string();
        };

        if let Some((_, path)) = self.paths.iter().find(|(keyword, _)| keyword == first) {
            return format!("{}{}", self.url, path);
        }

        match self.payload {
            Payload::Words => build_url_words(self.url, self.search, args),
            Payload::FirstArg => build_url(self.url, self.search, first),
            Payload::Raw => format!("{}{}{}", self.url, self.search, args.concat()),
            Payload::Ignored => self.url.to_string(),
        }
    }
}

static GOOGLE: Site = Site::new("https://google.com", "/search?q=", Payload::Words);
static DUCKDUCKGO: Site = Site::new("https://duckduckgo.com", "/?q=", Payload::Words);
static YOUTUBE: Site = Site {
    url: "https://youtube.com",
    search: "/results?search_query=",
    payload: Payload::FirstArg,
    paths: &[("subs", "/feed/subscriptions"), ("s", "/feed/subscriptions")],
};
static GITHUB: Site = Site::new("https://github.com", "/", Payload::Raw);
static MAPS: Site = Site::new("https://google.com/maps", "/search/", Payload::Words);
static DRIVE: Site = Site::new("https://drive.google.com", "/drive/search?q=", Payload::Words);
static CALENDAR: Site = Site::new("https://calendar.google.com", "", Payload::Ignored);
static GMAIL: Site = Site::new("https://mail.google.com", "/mail/u/0/#search/", Payload::Words);
static KEEP: Site = Site::new("https://keep.google.com", "/#search/text=", Payload::Words);
static AMAZON: Site = Site::new("https://amazon.com", "/s/?field-keywords=", Payload::Words);
static CLOUD_CONSOLE: Site =
    Site::new("https://console.cloud.google.com", "/search;q=", Payload::Words);
static CLOUDFLARE: Site = Site::new("https://cloudflare.com", "", Payload::Words);
static CHATGPT: Site = Site::new("https://chat.openai.com/chat", "", Payload::Words);
static KUBERNETES: Site = Site::new("https://kubernetes.io/docs/", "search/?q=", Payload::Words);
static TERRAFORM: Site =
    Site::new("https://app.terraform.io/app/organizations", "?q=", Payload::Words);
static SHEETS: Site = Site::new("https://docs.google.com/spreadsheets/", "", Payload::Ignored);
static NOTION: Site = Site::new("https://www.notion.so/", "", Payload::Ignored);
static ZOOM: Site = Site::new("https://zoom.us/myhome", "", Payload::Ignored);

impl Command {
    pub const ALL: [Command; 22] = [
        Command::Set,
        Command::Link,
        Command::Config,
        Command::Help,
        Command::Google,
        Command::DuckDuckGo,
        Command::YouTube,
        Command::GitHub,
        Command::Maps,
        Command::Drive,
        Command::Calendar,
        Command::Gmail,
        Command::Keep,
        Command::Amazon,
        Command::CloudConsole,
        Command::Cloudflare,
        Command::ChatGpt,
        Command::Kubernetes,
        Command::Terraform,
        Command::Sheets,
        Command::Notion,
        Command::Zoom,
    ];

    /// The token that invokes this command
    pub fn name(&self) -> &'static str {
        match self {
            Command::Set => "set",
            Command::Link => "link",
            Command::Config => "config",
            Command::Help => "help",
            Command::Google => "g",
            Command::DuckDuckGo => "dg",
            Command::YouTube => "y",
            Command::GitHub => "gh",
            Command::Maps => "map",
            Command::Drive => "gd",
            Command::Calendar => "gc",
            Command::Gmail => "gm",
            Command::Keep => "k",
            Command::Amazon => "a",
            Command::CloudConsole => "gcp",
            Command::Cloudflare => "cf",
            Command::ChatGpt => "gpt",
            Command::Kubernetes => "k8s",
            Command::Terraform => "tf",
            Command::Sheets => "sheet",
            Command::Notion => "n",
            Command::Zoom => "z",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::Set => "change a setting",
            Command::Link => "add, show or delete shortcuts",
            Command::Config => "export, import, open or fetch the config",
            Command::Help => "list commands",
            Command::Google => "Google",
            Command::DuckDuckGo => "DuckDuckGo",
            Command::YouTube => "YouTube",
            Command::GitHub => "GitHub",
            Command::Maps => "Google Maps",
            Command::Drive => "Google Drive",
            Command::Calendar => "Google Calendar",
            Command::Gmail => "Gmail",
            Command::Keep => "Google Keep",
            Command::Amazon => "Amazon",
            Command::CloudConsole => "Google Cloud console",
            Command::Cloudflare => "Cloudflare",
            Command::ChatGpt => "ChatGPT",
            Command::Kubernetes => "Kubernetes docs",
            Command::Terraform => "Terraform Cloud",
            Command::Sheets => "Google Sheets",
            Command::Notion => "Notion",
            Command::Zoom => "Zoom",
        }
    }

    /// Exact match on the canonical name only; aliases are not considered.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    pub fn site(&self) -> Option<&'static Site> {
        match self {
            Command::Set | Command::Link | Command::Config | Command::Help => None,
            Command::Google => Some(&GOOGLE),
            Command::DuckDuckGo => Some(&DUCKDUCKGO),
            Command::YouTube => Some(&YOUTUBE),
            Command::GitHub => Some(&GITHUB),
            Command::Maps => Some(&MAPS),
            Command::Drive => Some(&DRIVE),
            Command::Calendar => Some(&CALENDAR),
            Command::Gmail => Some(&GMAIL),
            Command::Keep => Some(&KEEP),
            Command::Amazon => Some(&AMAZON),
            Command::CloudConsole => Some(&CLOUD_CONSOLE),
            Command::Cloudflare => Some(&CLOUDFLARE),
            Command::ChatGpt => Some(&CHATGPT),
            Command::Kubernetes => Some(&KUBERNETES),
            Command::Terraform => Some(&TERRAFORM),
            Command::Sheets => Some(&SHEETS),
            Command::Notion => Some(&NOTION),
            Command::Zoom => Some(&ZOOM),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accepts a canonical name or an alias.
impl FromStr for Command {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::from_name(s)
            .or_else(|| resolve_alias(s))
            .ok_or_else(|| NavigationError::UnknownCommand(s.to_string()))
    }
}

pub fn resolve_alias(alias: &str) -> Option<Command> {
    ALIASES
        .iter()
        .find(|(name, _)| *name == alias)
        .map(|(_, command)| *command)
}

/// True when `name` is taken by a built-in command or an alias.
pub fn is_reserved(name: &str) -> bool {
    Command::from_name(name).is_some() || resolve_alias(name).is_some()
}
