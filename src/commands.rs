#![forbid(unsafe_code)]

//! Subcommands
//!
//! Every subcommand registers its argument schema on the shared
//! [`ArgumentParser`] when it is constructed, and is dispatched by the
//! [`CommandRegistry`](crate::cli::CommandRegistry) when its name is parsed.

pub mod dump;
pub mod generate;
pub mod init;
pub mod update;
pub mod version;

pub use dump::DumpCommand;
pub use generate::GenerateCommand;
pub use init::InitCommand;
pub use update::UpdateCommand;
pub use version::VersionCommand;

use crate::cli::{ArgumentParser, ParsedArguments};
use crate::error::{CommandError, ErrorHandling, FatalError};
use crate::output::Printing;
use clap::{Arg, ArgMatches, value_parser};
use std::path::PathBuf;
use std::rc::Rc;

/// Services shared by every command
#[derive(Clone)]
pub struct Context {
    pub printer: Rc<dyn Printing>,
    pub error_handler: Rc<dyn ErrorHandling>,
}

impl Context {
    pub fn new(printer: Rc<dyn Printing>, error_handler: Rc<dyn ErrorHandling>) -> Self {
        Context {
            printer,
            error_handler,
        }
    }

    /// Reports a failure the user can act on
    pub fn abort<E>(&self, error: E)
    where
        E: std::error::Error + 'static,
    {
        self.error_handler.fatal(FatalError::Abort(Box::new(error)));
    }
}

/// A subcommand of the CLI
pub trait Command {
    /// Registers the subcommand on `parser` and builds the command
    fn new(parser: &mut ArgumentParser, context: Context) -> Self
    where
        Self: Sized;

    /// Name the subcommand is registered and dispatched under
    fn command(&self) -> &'static str;

    /// Runs the command with the parse result
    ///
    /// Failures the command can explain to the user are reported through the
    /// context's error handler. Returning an error means the command hit a
    /// condition it cannot handle, which the registry reports as a bug.
    fn run(&self, arguments: &ParsedArguments) -> Result<(), CommandError>;
}

/// Shared `--path` argument
fn path_arg() -> Arg {
    Arg::new("path")
        .long("path")
        .short('p')
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Project directory. Defaults to the current directory")
}

/// Matches of `command` from the parse result
fn command_matches<'a>(
    arguments: &'a ParsedArguments,
    command: &'static str,
) -> Result<&'a ArgMatches, CommandError> {
    arguments
        .subcommand_matches(command)
        .ok_or(CommandError::MissingMatches(command))
}

/// Value of `--path`, or the current directory
fn resolve_path(matches: &ArgMatches) -> Result<PathBuf, CommandError> {
    match matches.get_one::<PathBuf>("path") {
        Some(path) => Ok(path.clone()),
        None => std::env::current_dir().map_err(|source| CommandError::Io {
            path: PathBuf::from("."),
            source,
        }),
    }
}
