#![forbid(unsafe_code)]

//! Logger for the `log` facade
//!
//! Writes one level-prefixed line per record to stderr, so that logs never
//! mix with command output on stdout.

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::sync::OnceLock;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

struct Logger {
    level: LevelFilter,
    color_choice: ColorChoice,
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the logger
///
/// # Errors
///
/// Fails if a logger was already installed for this process.
pub fn init(level: LevelFilter, color_choice: ColorChoice) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| Logger {
        level,
        color_choice,
    });
    log::set_logger(logger).map(|()| log::set_max_level(logger.level))
}

fn prefix(level: Level) -> (&'static str, Color) {
    match level {
        Level::Error => ("[x]", Color::Red),
        Level::Warn => ("[-]", Color::Yellow),
        Level::Info => ("[+]", Color::Green),
        Level::Debug => ("[~]", Color::Cyan),
        Level::Trace => ("[*]", Color::White),
    }
}

impl Logger {
    fn write(&self, record: &Record) -> std::io::Result<()> {
        let (prefix, color) = prefix(record.level());
        let mut stderr = StandardStream::stderr(self.color_choice);
        stderr.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(stderr, "{}", prefix)?;
        stderr.reset()?;
        writeln!(stderr, " {}: {}", record.target(), record.args())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = self.write(record);
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_prefixes_are_distinct() {
        let levels = [
            Level::Error,
            Level::Warn,
            Level::Info,
            Level::Debug,
            Level::Trace,
        ];
        let prefixes: HashSet<&str> = levels.iter().map(|l| prefix(*l).0).collect();
        assert_eq!(prefixes.len(), levels.len());
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = Logger {
            level: LevelFilter::Warn,
            color_choice: ColorChoice::Never,
        };
        let warn = Metadata::builder().level(Level::Warn).build();
        let info = Metadata::builder().level(Level::Info).build();

        assert!(log::Log::enabled(&logger, &warn));
        assert!(!log::Log::enabled(&logger, &info));
    }
}
