//! Clock text for the prompt

use chrono::{Local, Timelike};

use crate::settings::Settings;

/// `H:MM`; 12-hour mode shows 12 for midnight and noon.
pub fn clock_text<T: Timelike>(time: &T, military: bool) -> String {
    let hour = if military {
        time.hour()
    } else {
        match time.hour() % 12 {
            0 => 12,
            h => h,
        }
    };
    format!("{}:{:02}", hour, time.minute())
}

/// Current local time, or `None` when the clock is switched off.
pub fn current_clock(settings: &Settings) -> Option<String> {
    settings
        .show_clock
        .then(|| clock_text(&Local::now(), settings.military_clock))
}
