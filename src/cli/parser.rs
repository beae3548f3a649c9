#![forbid(unsafe_code)]

//! Shared argument parser
//!
//! Wraps a root `clap::Command` that subcommands extend with their own
//! argument schema. Every subcommand must be registered before [`ArgumentParser::parse`]
//! runs, since the parse only knows what has been registered so far.

use crate::output::Printing;
use clap::ArgMatches;

/// Usage line shown in the help text
pub const USAGE: &str = "<command> <options>";

/// One-line description of the tool
pub const OVERVIEW: &str = "Your Xcode buddy";

const BINARY_NAME: &str = "xcbuddy";

/// Argument parser shared by all registered commands
#[derive(Debug, Clone)]
pub struct ArgumentParser {
    command: clap::Command,
}

impl ArgumentParser {
    /// Creates a parser with the given usage and overview
    ///
    /// The parser expects the binary name to be stripped from its input and
    /// has no implicit `help` subcommand; `--help` still works.
    pub fn new(usage: &str, overview: &str) -> Self {
        let command = clap::Command::new(BINARY_NAME)
            .override_usage(usage.to_string())
            .about(overview.to_string())
            .no_binary_name(true)
            .disable_help_subcommand(true)
            .subcommand_required(false);

        ArgumentParser { command }
    }

    /// Adds a subcommand and its argument schema
    pub fn register(&mut self, subcommand: clap::Command) {
        let root = std::mem::take(&mut self.command);
        self.command = root.subcommand(subcommand);
    }

    /// Names of the registered subcommands, in registration order
    pub fn subcommand_names(&self) -> Vec<&str> {
        self.command.get_subcommands().map(|c| c.get_name()).collect()
    }

    /// Parses the arguments, which must not include the binary name
    ///
    /// # Errors
    ///
    /// Returns the `clap` error for malformed flags, unknown subcommands and
    /// help requests.
    pub fn parse(&self, arguments: &[String]) -> Result<ParsedArguments, clap::Error> {
        let matches = self
            .command
            .clone()
            .try_get_matches_from(arguments.iter().cloned())?;
        Ok(ParsedArguments { matches })
    }

    /// Renders the help text, without colors
    pub fn usage(&self) -> String {
        self.command.clone().render_help().to_string()
    }

    pub fn print_usage(&self, printer: &dyn Printing) {
        printer.print(self.usage().trim_end());
    }
}

impl Default for ArgumentParser {
    fn default() -> Self {
        Self::new(USAGE, OVERVIEW)
    }
}

/// Immutable result of a single parse
#[derive(Debug, Clone)]
pub struct ParsedArguments {
    matches: ArgMatches,
}

impl ParsedArguments {
    /// Name of the selected subcommand, if any
    pub fn subcommand(&self) -> Option<&str> {
        self.matches.subcommand_name()
    }

    /// Matches of the named subcommand, if it was the one selected
    pub fn subcommand_matches(&self, name: &str) -> Option<&ArgMatches> {
        self.matches.subcommand_matches(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;
    use clap::error::ErrorKind;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn create_parser() -> ArgumentParser {
        let mut parser = ArgumentParser::default();
        parser.register(
            clap::Command::new("dump")
                .about("Dumps the manifest")
                .arg(Arg::new("path").long("path").short('p')),
        );
        parser.register(clap::Command::new("version").about("Prints the version"));
        parser
    }

    #[test]
    fn test_parse_empty_selects_no_subcommand() {
        let parser = create_parser();
        let parsed = parser.parse(&[]).unwrap();
        assert_eq!(parsed.subcommand(), None);
    }

    #[test]
    fn test_parse_subcommand_with_options() {
        let parser = create_parser();
        let parsed = parser.parse(&args(&["dump", "--path", "/tmp/App"])).unwrap();

        assert_eq!(parsed.subcommand(), Some("dump"));
        let matches = parsed.subcommand_matches("dump").unwrap();
        assert_eq!(
            matches.get_one::<String>("path").map(String::as_str),
            Some("/tmp/App")
        );
        assert!(parsed.subcommand_matches("version").is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_subcommand() {
        let parser = create_parser();
        let error = parser.parse(&args(&["bogus"])).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_parse_rejects_unknown_flag() {
        let parser = create_parser();
        let error = parser.parse(&args(&["dump", "--nope"])).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_help_subcommand_is_not_registered() {
        let parser = create_parser();
        assert_eq!(parser.subcommand_names(), vec!["dump", "version"]);
        assert!(parser.parse(&args(&["help"])).is_err());
    }

    #[test]
    fn test_usage_contains_usage_and_overview() {
        let parser = create_parser();
        let usage = parser.usage();

        assert!(usage.contains(USAGE));
        assert!(usage.contains(OVERVIEW));
        assert!(usage.contains("dump"));
        assert!(usage.contains("version"));
    }
}
