#![forbid(unsafe_code)]

//! `xcbuddy generate`

use super::{Command, Context, command_matches, path_arg, resolve_path};
use crate::cli::{ArgumentParser, ParsedArguments};
use crate::error::CommandError;
use crate::generator::{GeneratedWorkspace, WorkspaceGenerator};
use crate::manifest::Project;
use std::path::Path;

/// Generates the Xcode workspace of a project
pub struct GenerateCommand {
    context: Context,
    generator: WorkspaceGenerator,
}

impl GenerateCommand {
    pub const NAME: &'static str = "generate";

    fn generate(&self, dir: &Path) -> Result<(Project, GeneratedWorkspace), CommandError> {
        let project = Project::load(dir)?;
        project.validate()?;

        let workspace = self
            .generator
            .generate(dir, &project)
            .map_err(|source| CommandError::Io {
                path: WorkspaceGenerator::workspace_path(dir, &project),
                source,
            })?;

        Ok((project, workspace))
    }
}

impl Command for GenerateCommand {
    fn new(parser: &mut ArgumentParser, context: Context) -> Self {
        parser.register(
            clap::Command::new(Self::NAME)
                .about("Generates an Xcode workspace from the project manifest")
                .arg(path_arg()),
        );

        GenerateCommand {
            context,
            generator: WorkspaceGenerator::new(),
        }
    }

    fn command(&self) -> &'static str {
        Self::NAME
    }

    fn run(&self, arguments: &ParsedArguments) -> Result<(), CommandError> {
        let matches = command_matches(arguments, Self::NAME)?;
        let path = resolve_path(matches)?;

        let (project, workspace) = match self.generate(&path) {
            Ok(generated) => generated,
            Err(error) => {
                self.context.abort(error);
                return Ok(());
            }
        };

        let printer = &self.context.printer;
        printer.print_section(&format!("Project {}", project.name));
        if project.targets.is_empty() {
            printer.print_warning("The project has no targets");
        }
        for target in &project.targets {
            printer.print(&format!(
                "  {} ({} {})",
                target.name, target.platform, target.product
            ));
        }
        printer.print_success(&format!("Generated {}", workspace.path.display()));

        Ok(())
    }
}
