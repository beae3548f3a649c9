#![forbid(unsafe_code)]

//! `xcbuddy update`
//!
//! Migrates a project manifest to the current schema version and rewrites
//! it in canonical form.

use super::{Command, Context, command_matches, path_arg, resolve_path};
use crate::cli::{ArgumentParser, ParsedArguments};
use crate::error::CommandError;
use crate::manifest::{CURRENT_SCHEMA_VERSION, ManifestError, Project};
use std::path::Path;

/// Result of an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    UpToDate,
    Migrated { from: u32, to: u32 },
}

/// Updates the project manifest to the latest schema
pub struct UpdateCommand {
    context: Context,
}

impl UpdateCommand {
    pub const NAME: &'static str = "update";

    pub fn update(&self, dir: &Path) -> Result<UpdateOutcome, ManifestError> {
        let mut project = Project::load(dir)?;

        if project.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(ManifestError::UnsupportedSchemaVersion {
                found: project.schema_version,
            });
        }
        if project.schema_version == CURRENT_SCHEMA_VERSION {
            return Ok(UpdateOutcome::UpToDate);
        }

        let from = project.schema_version;
        project.schema_version = CURRENT_SCHEMA_VERSION;
        project.validate()?;
        project.write(dir)?;
        log::info!("migrated manifest schema {} -> {}", from, CURRENT_SCHEMA_VERSION);

        Ok(UpdateOutcome::Migrated {
            from,
            to: CURRENT_SCHEMA_VERSION,
        })
    }
}

impl Command for UpdateCommand {
    fn new(parser: &mut ArgumentParser, context: Context) -> Self {
        parser.register(
            clap::Command::new(Self::NAME)
                .about("Updates the project manifest to the latest schema")
                .arg(path_arg()),
        );
        UpdateCommand { context }
    }

    fn command(&self) -> &'static str {
        Self::NAME
    }

    fn run(&self, arguments: &ParsedArguments) -> Result<(), CommandError> {
        let matches = command_matches(arguments, Self::NAME)?;
        let path = resolve_path(matches)?;

        match self.update(&path) {
            Ok(UpdateOutcome::UpToDate) => self
                .context
                .printer
                .print("The project manifest is already up to date"),
            Ok(UpdateOutcome::Migrated { from, to }) => self.context.printer.print_success(
                &format!("Updated the project manifest from schema {} to {}", from, to),
            ),
            Err(error) => self.context.abort(error),
        }

        Ok(())
    }
}
