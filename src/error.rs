#![forbid(unsafe_code)]

//! Error types and the fatal-error handler

pub mod handler;

pub use handler::{ErrorHandler, ErrorHandling};

use crate::manifest::ManifestError;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error carried by [`FatalError`]
pub type BoxError = Box<dyn StdError + 'static>;

/// Errors that terminate the process
///
/// `Abort` is an expected failure the user can act on. `Bug` signals a defect.
/// The silent variants hide the wrapped description from the user: an
/// `AbortSilent` prints nothing and a `BugSilent` prints a generic message.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("{0}")]
    Abort(BoxError),

    #[error("{0}")]
    Bug(BoxError),

    #[error("{0}")]
    AbortSilent(BoxError),

    #[error("{0}")]
    BugSilent(BoxError),
}

/// Classification of a [`FatalError`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalErrorKind {
    Abort,
    Bug,
    AbortSilent,
    BugSilent,
}

impl fmt::Display for FatalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalErrorKind::Abort => write!(f, "abort"),
            FatalErrorKind::Bug => write!(f, "bug"),
            FatalErrorKind::AbortSilent => write!(f, "abort-silent"),
            FatalErrorKind::BugSilent => write!(f, "bug-silent"),
        }
    }
}

impl FatalError {
    pub fn kind(&self) -> FatalErrorKind {
        match self {
            FatalError::Abort(_) => FatalErrorKind::Abort,
            FatalError::Bug(_) => FatalErrorKind::Bug,
            FatalError::AbortSilent(_) => FatalErrorKind::AbortSilent,
            FatalError::BugSilent(_) => FatalErrorKind::BugSilent,
        }
    }

    /// Whether the wrapped description must be kept from the user
    pub fn is_silent(&self) -> bool {
        matches!(self, FatalError::AbortSilent(_) | FatalError::BugSilent(_))
    }

    /// The wrapped error
    pub fn inner(&self) -> &(dyn StdError + 'static) {
        match self {
            FatalError::Abort(e)
            | FatalError::Bug(e)
            | FatalError::AbortSilent(e)
            | FatalError::BugSilent(e) => e.as_ref(),
        }
    }
}

/// Errors a subcommand could not resolve on its own
///
/// Commands report recoverable failures through their error handler. Anything
/// returned as a `CommandError` reaches the registry and is treated as a bug.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The parse result does not contain this command's matches
    #[error("No arguments were parsed for the '{0}' command")]
    MissingMatches(&'static str),

    /// A required argument has no value even though the parser accepted it
    #[error("Argument '{argument}' of '{command}' has no value")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
