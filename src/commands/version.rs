#![forbid(unsafe_code)]

//! `xcbuddy version`

use super::{Command, Context, command_matches};
use crate::cli::{ArgumentParser, ParsedArguments};
use crate::error::CommandError;

/// Version of this build
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prints the version of xcbuddy
pub struct VersionCommand {
    context: Context,
}

impl VersionCommand {
    pub const NAME: &'static str = "version";
}

impl Command for VersionCommand {
    fn new(parser: &mut ArgumentParser, context: Context) -> Self {
        parser.register(
            clap::Command::new(Self::NAME).about("Outputs the current version of xcbuddy"),
        );
        VersionCommand { context }
    }

    fn command(&self) -> &'static str {
        Self::NAME
    }

    fn run(&self, arguments: &ParsedArguments) -> Result<(), CommandError> {
        command_matches(arguments, Self::NAME)?;
        self.context.printer.print(VERSION);
        Ok(())
    }
}
