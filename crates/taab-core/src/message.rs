//! Timed messages
//!
//! One message at a time: showing a new one replaces the old one and its
//! deadline.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub duration: Duration,
}

impl Message {
    pub fn new(text: impl Into<String>, millis: u64) -> Self {
        Self {
            text: text.into(),
            duration: Duration::from_millis(millis),
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Default)]
pub struct MessageSlot {
    current: Option<(Message, Instant)>,
}

impl MessageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: Message) {
        self.show_at(message, Instant::now());
    }

    pub fn show_at(&mut self, message: Message, now: Instant) {
        let deadline = now + message.duration;
        self.current = Some((message, deadline));
    }

    pub fn current(&self) -> Option<&Message> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&Message> {
        self.current
            .as_ref()
            .filter(|(_, deadline)| now < *deadline)
            .map(|(message, _)| message)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
