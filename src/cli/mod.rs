//! CLI module for nflgate
//!
//! Provides the command-line interface:
//! - serve: start the HTTP gateway
//! - loaders: print the registered loaders as JSON and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::run;
pub use errors::{CliError, CliResult};
