//! CLI command implementations

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::GatewayConfig;
use crate::loaders;
use crate::server::GatewayServer;

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Parse arguments and dispatch to the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Command::Serve { host, port, quiet } => serve(host, port, quiet),
        Command::Loaders => print_loaders(),
    }
}

/// Start the gateway server, blocking until the process is stopped.
fn serve(host: Option<String>, port: Option<u16>, quiet: bool) -> CliResult<()> {
    let mut config = GatewayConfig::from_env()?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if quiet {
        config.quiet = true;
    }

    init_tracing();

    let registry = Arc::new(loaders::builtin());
    let server = GatewayServer::new(config, registry);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;
    Ok(())
}

/// Print the registry's introspection descriptors as pretty JSON.
fn print_loaders() -> CliResult<()> {
    let registry = loaders::builtin();
    let rendered = serde_json::to_string_pretty(registry.descriptors())?;
    println!("{rendered}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("nflgate=info,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
