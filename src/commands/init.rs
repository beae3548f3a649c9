#![forbid(unsafe_code)]

//! `xcbuddy init`
//!
//! Bootstraps a project directory: writes a template `Project.toml` and
//! creates the `Sources/` and `Tests/` directories its targets point at.

use super::{Command, Context, command_matches, path_arg, resolve_path};
use crate::cli::{ArgumentParser, ParsedArguments};
use crate::error::CommandError;
use crate::manifest::{ManifestError, Platform, Product, Project};
use clap::{Arg, value_parser};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SOURCE_DIRECTORIES: &[&str] = &["Sources", "Tests"];

/// Errors that can occur while bootstrapping a project
#[derive(Debug, Error)]
pub enum InitError {
    #[error("A Project.toml already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Cannot infer a project name from {}, pass one with --name", .0.display())]
    UnnamedDirectory(PathBuf),

    #[error("Failed to create directory '{}': {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to resolve '{}': {source}", path.display())]
    ResolvePath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Bootstraps a new project
pub struct InitCommand {
    context: Context,
}

impl InitCommand {
    pub const NAME: &'static str = "init";

    /// Creates the project in `dir` and returns its manifest
    ///
    /// Nothing is created on disk until the manifest is known to be valid,
    /// and the manifest is written last.
    pub fn init(
        &self,
        dir: &Path,
        name: Option<&str>,
        platform: Platform,
        product: Product,
    ) -> Result<Project, InitError> {
        if Project::manifest_path(dir).exists() {
            return Err(InitError::AlreadyExists(dir.to_path_buf()));
        }

        let name = match name {
            Some(name) => name.to_string(),
            None => infer_name(dir)?,
        };

        let project = Project::template(&name, platform, product);
        project.validate()?;

        create_directory(dir)?;
        for directory in SOURCE_DIRECTORIES {
            create_directory(&dir.join(directory))?;
        }

        let manifest_path = project.write(dir)?;
        log::info!("wrote {}", manifest_path.display());

        Ok(project)
    }
}

impl Command for InitCommand {
    fn new(parser: &mut ArgumentParser, context: Context) -> Self {
        let subcommand = clap::Command::new(Self::NAME)
            .about("Bootstraps a new project")
            .arg(path_arg())
            .arg(
                Arg::new("name")
                    .long("name")
                    .short('n')
                    .value_name("NAME")
                    .help("Project name. Defaults to the name of the project directory"),
            )
            .arg(
                Arg::new("platform")
                    .long("platform")
                    .value_parser(value_parser!(Platform))
                    .default_value("ios")
                    .help("Platform of the main target"),
            )
            .arg(
                Arg::new("product")
                    .long("product")
                    .value_parser(value_parser!(Product))
                    .default_value("app")
                    .help("Product of the main target"),
            );
        parser.register(subcommand);

        InitCommand { context }
    }

    fn command(&self) -> &'static str {
        Self::NAME
    }

    fn run(&self, arguments: &ParsedArguments) -> Result<(), CommandError> {
        let matches = command_matches(arguments, Self::NAME)?;
        let path = resolve_path(matches)?;
        let name = matches.get_one::<String>("name").map(String::as_str);
        let platform = *matches
            .get_one::<Platform>("platform")
            .ok_or(CommandError::MissingArgument {
                command: Self::NAME,
                argument: "platform",
            })?;
        let product = *matches
            .get_one::<Product>("product")
            .ok_or(CommandError::MissingArgument {
                command: Self::NAME,
                argument: "product",
            })?;

        match self.init(&path, name, platform, product) {
            Ok(project) => self.context.printer.print_success(&format!(
                "Project {} ({} {}) initialized at {}",
                project.name,
                platform,
                product,
                path.display()
            )),
            Err(error) => self.context.abort(error),
        }

        Ok(())
    }
}

fn create_directory(path: &Path) -> Result<(), InitError> {
    std::fs::create_dir_all(path).map_err(|source| InitError::CreateDirectory {
        path: path.to_path_buf(),
        source,
    })
}

/// Last component of the directory path
///
/// An existing directory is canonicalized; one still to be created is made
/// absolute against the current directory.
fn infer_name(dir: &Path) -> Result<String, InitError> {
    let resolved = if dir.exists() {
        dir.canonicalize()
    } else {
        std::path::absolute(dir)
    };
    let resolved = resolved.map_err(|source| InitError::ResolvePath {
        path: dir.to_path_buf(),
        source,
    })?;

    resolved
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| InitError::UnnamedDirectory(dir.to_path_buf()))
}
