#![forbid(unsafe_code)]

//! Fatal-error reporting
//!
//! The handler prints a diagnostic for a [`FatalError`] and terminates the
//! process with exit code 1. The exit is injected so the reporting can be
//! observed without ending the test process.

use super::{FatalError, FatalErrorKind};
use crate::output::Printing;
use std::rc::Rc;

/// Exit code used for every fatal error
pub const EXIT_FAILURE: i32 = 1;

/// Message shown instead of the description of a [`FatalError::BugSilent`]
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error happened. \
This is a bug in xcbuddy, please report it with the steps to reproduce it.\n\
Run again with XCBUDDY_LOG=debug to see the underlying error.";

/// Something that can report a fatal error and stop the process
pub trait ErrorHandling {
    fn fatal(&self, error: FatalError);
}

/// Terminates the process with the given code
pub type Exiter = Box<dyn Fn(i32)>;

/// Default [`ErrorHandling`] implementation
pub struct ErrorHandler {
    printer: Rc<dyn Printing>,
    exiter: Exiter,
}

impl ErrorHandler {
    /// Creates a handler that exits the process after reporting
    pub fn new(printer: Rc<dyn Printing>) -> Self {
        Self::with_exiter(printer, Box::new(|code| std::process::exit(code)))
    }

    /// Creates a handler with a custom exit behavior
    pub fn with_exiter(printer: Rc<dyn Printing>, exiter: Exiter) -> Self {
        ErrorHandler { printer, exiter }
    }
}

impl ErrorHandling for ErrorHandler {
    fn fatal(&self, error: FatalError) {
        let description = error.to_string();
        log::debug!("fatal error ({}): {:?}", error.kind(), error.inner());

        if !error.is_silent() && !description.is_empty() {
            self.printer.print_error_message(&description);
        } else if error.kind() == FatalErrorKind::BugSilent {
            self.printer.print_error_message(UNEXPECTED_ERROR_MESSAGE);
        }

        (self.exiter)(EXIT_FAILURE);
    }
}
