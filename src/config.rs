#![forbid(unsafe_code)]

//! Settings read from the environment
//!
//! | Variable        | Values                                      | Default |
//! |-----------------|---------------------------------------------|---------|
//! | `XCBUDDY_LOG`   | `off`, `error`, `warn`, `info`, `debug`, `trace` | `warn`  |
//! | `XCBUDDY_COLOR` | `auto`, `always`, `never`                   | `auto`  |
//! | `NO_COLOR`      | any non-empty value disables colors         |         |
//!
//! Unknown values fall back to the defaults.

use log::LevelFilter;
use termcolor::ColorChoice;

pub const LOG_ENV: &str = "XCBUDDY_LOG";
pub const COLOR_ENV: &str = "XCBUDDY_COLOR";
pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// Process-wide settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub log_level: LevelFilter,
    pub color: ColorChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_level: LevelFilter::Warn,
            color: ColorChoice::Auto,
        }
    }
}

impl Settings {
    /// Reads the settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through the given variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let log_level = lookup(LOG_ENV)
            .and_then(|value| parse_level(&value))
            .unwrap_or(defaults.log_level);

        let color = match lookup(COLOR_ENV).and_then(|value| parse_color(&value)) {
            Some(color) => color,
            None if lookup(NO_COLOR_ENV).is_some_and(|value| !value.is_empty()) => {
                ColorChoice::Never
            }
            None => defaults.color,
        };

        Settings { log_level, color }
    }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok()
}

fn parse_color(value: &str) -> Option<ColorChoice> {
    match value.trim().to_ascii_lowercase().as_str() {
        "auto" => Some(ColorChoice::Auto),
        "always" => Some(ColorChoice::Always),
        "never" => Some(ColorChoice::Never),
        _ => None,
    }
}
