//! `set;<setting>[;value]`

use regex::Regex;
use std::sync::OnceLock;

use taab_navigation::Command;

use super::CommandContext;
use crate::outcome::Outcome;
use crate::settings::Settings;

const SETTINGS: &str =
    "defaultCommand, bgColor, textColor, fontSize, clockSize, alwaysNewTab, clock, defaults";

/// `#rgb` or `#rrggbb`
fn is_hex_color(value: &str) -> bool {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| {
        Regex::new(r"(?i)^#[0-9a-f]{3}(?:[0-9a-f]{3})?$").expect("hex pattern compiles")
    })
    .is_match(value)
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

pub(super) fn execute(args: &[String], cx: &mut CommandContext<'_>) -> Outcome {
    let Some(name) = args.first() else {
        return Outcome::message(
            format!("Usage: set;<setting>[;value]\nSettings: {SETTINGS}"),
            8000,
        );
    };
    let value = args.get(1).map(String::as_str);

    match name.as_str() {
        "defaultCommand" => default_command(value, cx),
        "bgColor" => color("background color", value, cx, |s| &mut s.bg_color),
        "textColor" => color("text color", value, cx, |s| &mut s.text_color),
        "fontSize" => size("input font size", value, cx, |s| &mut s.font_size),
        "clockSize" => size("clock font size", value, cx, |s| &mut s.clock_size),
        "newtab" | "alwaysNewTab" => always_new_tab(value, cx),
        "clock" => clock(value, cx),
        "defaults" => {
            *cx.settings = Settings::default();
            cx.mark_dirty();
            tracing::info!("Settings reset to defaults");
            Outcome::message("Settings reset to defaults", 5000)
        }
        other => Outcome::message(format!("\"{other}\" is not a valid setting"), 5000),
    }
}

fn default_command(value: Option<&str>, cx: &mut CommandContext<'_>) -> Outcome {
    let Some(value) = value else {
        return Outcome::message(
            format!("Default command: {}", cx.settings.default_command),
            5000,
        );
    };

    match value.to_lowercase().parse::<Command>() {
        Ok(command) => {
            cx.settings.default_command = command.name().to_string();
            cx.mark_dirty();
            Outcome::message(format!("Set default command to {command}"), 3000)
        }
        Err(_) => Outcome::message(
            format!("Error: command {value} not found; default command not changed"),
            10_000,
        ),
    }
}

fn color(
    label: &str,
    value: Option<&str>,
    cx: &mut CommandContext<'_>,
    field: fn(&mut Settings) -> &mut String,
) -> Outcome {
    let Some(value) = value else {
        return Outcome::message(format!("Current {label}: {}", field(cx.settings)), 8000);
    };

    if !is_hex_color(value) {
        return Outcome::message("Error: invalid hex value", 5000);
    }

    *field(cx.settings) = value.to_string();
    cx.mark_dirty();
    Outcome::message(format!("Set {label} to {value}"), 3000)
}

fn size(
    label: &str,
    value: Option<&str>,
    cx: &mut CommandContext<'_>,
    field: fn(&mut Settings) -> &mut String,
) -> Outcome {
    let Some(value) = value else {
        return Outcome::message(format!("Current {label}: {}", field(cx.settings)), 8000);
    };

    if value.is_empty() {
        return Outcome::message(format!("Error: {label} cannot be empty"), 5000);
    }

    *field(cx.settings) = value.to_string();
    cx.mark_dirty();
    Outcome::message(format!("Set {label} to {value}"), 3000)
}

fn always_new_tab(value: Option<&str>, cx: &mut CommandContext<'_>) -> Outcome {
    let enabled = match value {
        None => {
            return Outcome::message(
                format!("alwaysNewTab is {}", on_off(cx.settings.always_new_tab)),
                5000,
            )
        }
        Some("on") => true,
        Some("off") => false,
        Some(_) => return Outcome::message("Must be set to either 'on' or 'off'", 5000),
    };

    cx.settings.always_new_tab = enabled;
    cx.mark_dirty();
    Outcome::message(format!("alwaysNewTab is {}", on_off(enabled)), 3000)
}

fn clock(value: Option<&str>, cx: &mut CommandContext<'_>) -> Outcome {
    match value {
        None => {
            return Outcome::message(
                format!(
                    "Clock is {}, {}-hour",
                    on_off(cx.settings.show_clock),
                    if cx.settings.military_clock { "24" } else { "12" }
                ),
                5000,
            )
        }
        Some("on") => cx.settings.show_clock = true,
        Some("off") => cx.settings.show_clock = false,
        Some("12") => cx.settings.military_clock = false,
        Some("24") => cx.settings.military_clock = true,
        Some(_) => return Outcome::message("Must be set to 'on', 'off', '12' or '24'", 5000),
    }

    cx.mark_dirty();
    Outcome::Nothing
}
