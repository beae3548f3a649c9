//! CLI argument parsing and command dispatch

pub mod parser;
pub mod registry;

// Re-export types for convenient access
pub use parser::{ArgumentParser, OVERVIEW, ParsedArguments, USAGE};
pub use registry::{CommandRegistry, ProcessArguments};
