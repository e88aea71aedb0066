//! Persisted user settings
//!
//! The whole record lives as one JSON object under [`SETTINGS_KEY`].
//! Loading and importing are the same operation: a shallow, per-key merge
//! over the current values where a key with a bad value keeps its old one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use taab_navigation::{Link, LinkRegistry};

use crate::error::CoreError;
use crate::Result;

pub const SETTINGS_KEY: &str = "taabSettings";
/// Copy of a stored record that could not be read
pub const SETTINGS_BACKUP_KEY: &str = "taabSettings.unreadable";
/// Link list written by older releases
pub const LEGACY_LINKS_KEY: &str = "customCommands";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub default_command: String,
    pub bg_color: String,
    pub text_color: String,
    pub font_size: String,
    pub clock_size: String,
    pub show_clock: bool,
    pub military_clock: bool,
    pub always_new_tab: bool,
    #[serde(rename = "gistID")]
    pub gist_id: String,
    pub links: LinkRegistry,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_command: "g".to_string(),
            bg_color: "#282828".to_string(),
            text_color: "#ebdbb2".to_string(),
            font_size: "1.75em".to_string(),
            clock_size: "2em".to_string(),
            show_clock: true,
            military_clock: true,
            always_new_tab: false,
            gist_id: String::new(),
            links: LinkRegistry::new(),
        }
    }
}

impl Settings {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Defaults with `json` merged over them.
    pub fn from_json_over_defaults(json: &str) -> Result<Self> {
        let mut settings = Self::default();
        settings.import_json(json)?;
        Ok(settings)
    }

    /// Merge a JSON object given as text. Returns the keys that were rejected.
    pub fn import_json(&mut self, json: &str) -> Result<Vec<String>> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(patch) => self.merge(&patch),
            other => Err(CoreError::Config(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Shallow merge: every key in `patch` replaces the current value if the
    /// result still deserializes. Unknown keys are ignored.
    pub fn merge(&mut self, patch: &Map<String, Value>) -> Result<Vec<String>> {
        let mut accepted = match serde_json::to_value(&*self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let mut rejected = Vec::new();

        for (key, value) in patch {
            let mut candidate = accepted.clone();
            candidate.insert(key.clone(), value.clone());
            match serde_json::from_value::<Settings>(Value::Object(candidate.clone())) {
                Ok(_) => accepted = candidate,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Ignoring invalid setting");
                    rejected.push(key.clone());
                }
            }
        }

        *self = serde_json::from_value(Value::Object(accepted))?;
        self.links.sanitize_builtins();
        Ok(rejected)
    }

    /// Replace the registry with links stored under [`LEGACY_LINKS_KEY`].
    pub fn import_legacy_links(&mut self, json: &str) -> Result<usize> {
        let links: Vec<Link> = serde_json::from_str(json)?;
        self.links = LinkRegistry::from(links);
        self.links.sanitize_builtins();
        Ok(self.links.len())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
