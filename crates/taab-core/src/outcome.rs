//! What a dispatch asks the host to do

use crate::message::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub url: String,
    /// Open in a separate browsing context
    pub new_tab: bool,
}

/// A yes/no question; answer it with [`crate::Taab::confirm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Nothing,
    Navigate(Navigation),
    Message(Message),
    Confirm(Confirmation),
    /// Start a remote config fetch for `gist_id`
    Fetch { gist_id: String, message: Message },
}

impl Outcome {
    pub fn message(text: impl Into<String>, millis: u64) -> Self {
        Outcome::Message(Message::new(text, millis))
    }

    pub fn displayed(&self) -> Option<&Message> {
        match self {
            Outcome::Message(message) | Outcome::Fetch { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn navigation(&self) -> Option<&Navigation> {
        match self {
            Outcome::Navigate(navigation) => Some(navigation),
            _ => None,
        }
    }
}
