#![forbid(unsafe_code)]

//! Command registry
//!
//! Owns the argument parser and the registered commands, parses the process
//! arguments once and dispatches to the command named by the parse result.

use crate::cli::parser::{ArgumentParser, ParsedArguments};
use crate::commands::{
    Command, Context, DumpCommand, GenerateCommand, InitCommand, UpdateCommand, VersionCommand,
};
use crate::config::Settings;
use crate::error::{CommandError, ErrorHandler, ErrorHandling, FatalError};
use crate::output::{Printer, Printing};
use std::ffi::OsString;
use std::rc::Rc;

/// Source of the raw process arguments, binary name included
pub type ProcessArguments = Box<dyn Fn() -> Vec<String>>;

/// Registry that contains all the commands
pub struct CommandRegistry {
    parser: ArgumentParser,
    context: Context,
    commands: Vec<Box<dyn Command>>,
    process_arguments: ProcessArguments,
}

impl CommandRegistry {
    /// Creates a registry reading the arguments of the current process
    pub fn new() -> Self {
        Self::with_settings(Settings::from_env())
    }

    /// Creates a registry reading the arguments of the current process,
    /// with settings the caller already read
    pub fn with_settings(settings: Settings) -> Self {
        Self::configured(Self::process_arguments, settings)
    }

    /// Creates a registry with a custom argument source
    ///
    /// The printer and error handler are configured from the environment.
    pub fn with_process_arguments<F>(process_arguments: F) -> Self
    where
        F: Fn() -> Vec<String> + 'static,
    {
        Self::configured(process_arguments, Settings::from_env())
    }

    fn configured<F>(process_arguments: F, settings: Settings) -> Self
    where
        F: Fn() -> Vec<String> + 'static,
    {
        let printer: Rc<dyn Printing> = Rc::new(Printer::new(settings.color));
        let error_handler: Rc<dyn ErrorHandling> = Rc::new(ErrorHandler::new(printer.clone()));
        Self::with_context(process_arguments, Context::new(printer, error_handler))
    }

    /// Creates a registry with a custom argument source, printer and error handler
    pub fn with_context<F>(process_arguments: F, context: Context) -> Self
    where
        F: Fn() -> Vec<String> + 'static,
    {
        let mut registry = Self::empty(process_arguments, context);
        registry.register::<InitCommand>();
        registry.register::<GenerateCommand>();
        registry.register::<UpdateCommand>();
        registry.register::<DumpCommand>();
        registry.register::<VersionCommand>();
        registry
    }

    fn empty<F>(process_arguments: F, context: Context) -> Self
    where
        F: Fn() -> Vec<String> + 'static,
    {
        CommandRegistry {
            parser: ArgumentParser::default(),
            context,
            commands: Vec::new(),
            process_arguments: Box::new(process_arguments),
        }
    }

    /// Returns the arguments of the current process
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    pub fn process_arguments() -> Vec<String> {
        lossy_arguments(std::env::args_os())
    }

    fn register<C>(&mut self)
    where
        C: Command + 'static,
    {
        self.register_with(|parser, context| Box::new(C::new(parser, context)));
    }

    fn register_with<F>(&mut self, build: F)
    where
        F: FnOnce(&mut ArgumentParser, Context) -> Box<dyn Command>,
    {
        let command = build(&mut self.parser, self.context.clone());
        self.commands.push(command);
    }

    /// Names of the registered commands, in registration order
    pub fn commands(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.command()).collect()
    }

    pub fn parser(&self) -> &ArgumentParser {
        &self.parser
    }

    /// Runs the command line interface
    ///
    /// # Errors
    ///
    /// Returns the parser's error when the arguments cannot be parsed. An
    /// error escaping a command never reaches the caller: it is reported to
    /// the error handler as a [`FatalError::BugSilent`].
    pub fn run(&self) -> Result<(), clap::Error> {
        let arguments = self.parse()?;
        if let Err(error) = self.process(&arguments) {
            // Commands handle their own errors; one that gets here is a bug.
            log::debug!("command returned an unhandled error: {}", error);
            self.context
                .error_handler
                .fatal(FatalError::BugSilent(Box::new(error)));
        }
        Ok(())
    }

    /// Parses the process arguments without the binary name
    fn parse(&self) -> Result<ParsedArguments, clap::Error> {
        let arguments: Vec<String> = (self.process_arguments)().into_iter().skip(1).collect();
        log::debug!("parsing arguments {:?}", arguments);
        self.parser.parse(&arguments)
    }

    /// Dispatches to the selected command, or prints usage if there is none
    fn process(&self, arguments: &ParsedArguments) -> Result<(), CommandError> {
        let command = arguments
            .subcommand()
            .and_then(|name| self.commands.iter().find(|c| c.command() == name));

        match command {
            Some(command) => {
                log::debug!("dispatching to '{}'", command.command());
                command.run(arguments)
            }
            None => {
                log::debug!("no command selected for {:?}", arguments.subcommand());
                self.parser.print_usage(self.context.printer.as_ref());
                Ok(())
            }
        }
    }
}

fn lossy_arguments<I>(arguments: I) -> Vec<String>
where
    I: IntoIterator<Item = OsString>,
{
    arguments
        .into_iter()
        .map(|argument| argument.to_string_lossy().into_owned())
        .collect()
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parser::{OVERVIEW, USAGE};
    use crate::commands::testing::{RecordingErrorHandler, create_context};
    use crate::commands::version::VERSION;
    use crate::error::FatalErrorKind;
    use crate::error::handler::EXIT_FAILURE;
    use crate::output::BufferPrinter;
    use clap::error::ErrorKind;
    use std::cell::Cell;

    const EXPECTED_COMMANDS: [&str; 5] = ["init", "generate", "update", "dump", "version"];

    /// Command that counts its runs and optionally fails
    struct MockCommand {
        name: &'static str,
        runs: Rc<Cell<usize>>,
        fail: bool,
    }

    impl MockCommand {
        fn build(
            parser: &mut ArgumentParser,
            name: &'static str,
            fail: bool,
        ) -> (Self, Rc<Cell<usize>>) {
            parser.register(clap::Command::new(name).arg(clap::Arg::new("flag").long("flag")));
            let runs = Rc::new(Cell::new(0));
            let command = MockCommand {
                name,
                runs: Rc::clone(&runs),
                fail,
            };
            (command, runs)
        }
    }

    impl Command for MockCommand {
        fn new(parser: &mut ArgumentParser, _context: Context) -> Self {
            Self::build(parser, "mock", false).0
        }

        fn command(&self) -> &'static str {
            self.name
        }

        fn run(&self, arguments: &ParsedArguments) -> Result<(), CommandError> {
            self.runs.set(self.runs.get() + 1);
            if self.fail {
                return Err(CommandError::MissingMatches(self.name));
            }
            arguments
                .subcommand_matches(self.name)
                .map(|_| ())
                .ok_or(CommandError::MissingMatches(self.name))
        }
    }

    fn arguments(values: &[&str]) -> impl Fn() -> Vec<String> + use<> {
        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        move || values.clone()
    }

    fn mock_registry(
        values: &[&str],
        mocks: &[(&'static str, bool)],
    ) -> (
        CommandRegistry,
        Vec<Rc<Cell<usize>>>,
        Rc<BufferPrinter>,
        Rc<RecordingErrorHandler>,
    ) {
        let (context, printer, handler) = create_context();
        let mut registry = CommandRegistry::empty(arguments(values), context);
        let mut counters = Vec::new();
        for (name, fail) in mocks {
            registry.register_with(|parser, _| {
                let (command, runs) = MockCommand::build(parser, *name, *fail);
                counters.push(runs);
                Box::new(command)
            });
        }
        (registry, counters, printer, handler)
    }

    #[test]
    fn test_registration_order_is_stable() {
        for _ in 0..3 {
            let (context, _, _) = create_context();
            let registry = CommandRegistry::with_context(arguments(&[]), context);

            assert_eq!(registry.commands(), EXPECTED_COMMANDS);
            assert_eq!(registry.parser().subcommand_names(), EXPECTED_COMMANDS);
        }
    }

    #[test]
    fn test_version_dispatches_to_version_command() {
        let (context, printer, handler) = create_context();
        let registry = CommandRegistry::with_context(arguments(&["xcbuddy", "version"]), context);

        registry.run().unwrap();

        assert_eq!(printer.output(), format!("{}\n", VERSION));
        assert!(handler.reports.borrow().is_empty());
    }

    #[test]
    fn test_no_subcommand_prints_usage() {
        let (context, printer, handler) = create_context();
        let registry = CommandRegistry::with_context(arguments(&["xcbuddy"]), context);

        registry.run().unwrap();

        let output = printer.output();
        assert!(output.contains(USAGE));
        assert!(output.contains(OVERVIEW));
        for command in EXPECTED_COMMANDS {
            assert!(output.contains(command));
        }
        assert!(handler.reports.borrow().is_empty());
    }

    #[test]
    fn test_empty_argument_source_prints_usage() {
        let (context, printer, _) = create_context();
        let registry = CommandRegistry::with_context(arguments(&[]), context);

        registry.run().unwrap();

        assert!(printer.output().contains(USAGE));
    }

    #[test]
    fn test_unknown_subcommand_is_parse_error() {
        let (context, printer, handler) = create_context();
        let registry = CommandRegistry::with_context(arguments(&["xcbuddy", "bogus"]), context);

        let error = registry.run().unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InvalidSubcommand);
        assert!(printer.output().is_empty());
        assert!(handler.reports.borrow().is_empty());
    }

    #[test]
    fn test_each_tag_dispatches_exactly_once() {
        let names = ["alpha", "beta", "gamma"];
        for selected in names {
            let (registry, counters, printer, handler) = mock_registry(
                &["xcbuddy", selected, "--flag", "on"],
                &[("alpha", false), ("beta", false), ("gamma", false)],
            );

            registry.run().unwrap();

            for (name, runs) in names.iter().zip(&counters) {
                let expected = if *name == selected { 1 } else { 0 };
                assert_eq!(runs.get(), expected, "runs of '{}'", name);
            }
            assert!(printer.output().is_empty());
            assert!(handler.reports.borrow().is_empty());
        }
    }

    #[test]
    fn test_no_subcommand_dispatches_nothing() {
        let (registry, counters, printer, _) =
            mock_registry(&["xcbuddy"], &[("alpha", false), ("beta", false)]);

        registry.run().unwrap();

        assert!(counters.iter().all(|runs| runs.get() == 0));
        assert!(printer.output().contains(USAGE));
    }

    #[test]
    fn test_lookup_miss_prints_usage() {
        let (mut registry, counters, printer, handler) =
            mock_registry(&["xcbuddy", "orphan"], &[("alpha", false)]);
        registry.parser.register(clap::Command::new("orphan"));

        registry.run().unwrap();

        assert_eq!(counters[0].get(), 0);
        assert!(printer.output().contains(USAGE));
        assert!(handler.reports.borrow().is_empty());
    }

    #[test]
    fn test_command_error_is_reported_as_silent_bug() {
        let (registry, counters, printer, handler) =
            mock_registry(&["xcbuddy", "alpha"], &[("alpha", true)]);

        let result = registry.run();

        assert!(result.is_ok());
        assert_eq!(counters[0].get(), 1);
        let reports = handler.reports.borrow();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, FatalErrorKind::BugSilent);
        assert!(printer.output().is_empty());
    }

    #[test]
    fn test_silent_bug_hides_original_error_from_user() {
        let printer = Rc::new(BufferPrinter::new());
        let exit_code = Rc::new(Cell::new(None));
        let recorded = Rc::clone(&exit_code);
        let handler = Rc::new(ErrorHandler::with_exiter(
            printer.clone(),
            Box::new(move |code| recorded.set(Some(code))),
        ));
        let context = Context::new(printer.clone(), handler);

        let mut registry = CommandRegistry::empty(arguments(&["xcbuddy", "alpha"]), context);
        registry.register_with(|parser, _| Box::new(MockCommand::build(parser, "alpha", true).0));

        registry.run().unwrap();

        let errors = printer.errors();
        assert!(errors.contains("An unexpected error happened"));
        assert!(!errors.contains("No arguments were parsed"));
        assert_eq!(exit_code.get(), Some(EXIT_FAILURE));
    }

    #[test]
    fn test_with_settings_registers_every_command() {
        let settings = Settings {
            color: termcolor::ColorChoice::Never,
            ..Settings::default()
        };
        let registry = CommandRegistry::with_settings(settings);

        assert_eq!(registry.commands(), EXPECTED_COMMANDS);
    }

    #[test]
    fn test_lossy_arguments_keep_utf8_unchanged() {
        let arguments = lossy_arguments(["xcbuddy", "dump", "--path", "Café"].map(OsString::from));

        assert_eq!(arguments, ["xcbuddy", "dump", "--path", "Café"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_lossy_arguments_replace_invalid_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let invalid = OsString::from_vec(vec![b'A', b'p', b'p', 0x80]);
        let arguments = lossy_arguments(vec![OsString::from("xcbuddy"), invalid]);

        assert_eq!(arguments, ["xcbuddy", "App\u{FFFD}"]);
    }

    #[test]
    fn test_argument_source_is_read_once_per_run() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let (context, _, _) = create_context();
        let registry = CommandRegistry::with_context(
            move || {
                counter.set(counter.get() + 1);
                vec!["xcbuddy".to_string(), "version".to_string()]
            },
            context,
        );

        assert_eq!(calls.get(), 0);
        registry.run().unwrap();
        assert_eq!(calls.get(), 1);
    }
}
