//! CLI argument definitions using clap
//!
//! Commands:
//! - nflgate serve [--host <host>] [--port <port>] [--quiet]
//! - nflgate loaders

use clap::{Parser, Subcommand};

/// nflgate - HTTP gateway exposing NFL data loaders as JSON endpoints
#[derive(Parser, Debug)]
#[command(name = "nflgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the gateway server
    Serve {
        /// Bind host (overrides NFLGATE_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides NFLGATE_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Suppress per-request access logging (overrides NFLGATE_QUIET)
        #[arg(long)]
        quiet: bool,
    },

    /// Print the registered loaders as JSON and exit
    Loaders,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
