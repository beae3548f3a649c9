#![forbid(unsafe_code)]

//! `xcbuddy dump`
//!
//! Prints the project manifest as pretty JSON, the way xcbuddy reads it.

use super::{Command, Context, command_matches, path_arg, resolve_path};
use crate::cli::{ArgumentParser, ParsedArguments};
use crate::error::CommandError;
use crate::manifest::{ManifestError, Project};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while dumping a manifest
#[derive(Debug, Error)]
pub enum DumpError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Failed to encode the manifest as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outputs the project manifest as JSON
pub struct DumpCommand {
    context: Context,
}

impl DumpCommand {
    pub const NAME: &'static str = "dump";

    pub fn dump(&self, dir: &Path) -> Result<String, DumpError> {
        let project = Project::load(dir)?;
        Ok(serde_json::to_string_pretty(&project)?)
    }
}

impl Command for DumpCommand {
    fn new(parser: &mut ArgumentParser, context: Context) -> Self {
        parser.register(
            clap::Command::new(Self::NAME)
                .about("Outputs the project manifest as a JSON")
                .arg(path_arg()),
        );
        DumpCommand { context }
    }

    fn command(&self) -> &'static str {
        Self::NAME
    }

    fn run(&self, arguments: &ParsedArguments) -> Result<(), CommandError> {
        let matches = command_matches(arguments, Self::NAME)?;
        let path = resolve_path(matches)?;

        match self.dump(&path) {
            Ok(json) => self.context.printer.print(&json),
            Err(error) => self.context.abort(error),
        }

        Ok(())
    }
}
