#![forbid(unsafe_code)]

//! xcbuddy: your Xcode buddy
//!
//! A command-line front-end that registers a fixed set of subcommands
//! (`init`, `generate`, `update`, `dump`, `version`), parses the process
//! arguments once and dispatches to the matching subcommand. Errors that
//! escape a subcommand are reported through a fatal-error handler.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod manifest;
pub mod output;
