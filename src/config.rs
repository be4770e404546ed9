//! Gateway configuration
//!
//! Bind host, bind port and the quiet flag are resolved from the
//! environment with conventional defaults; CLI flags may override them.

use thiserror::Error;

/// Environment variable naming the bind host.
pub const ENV_HOST: &str = "NFLGATE_HOST";
/// Environment variable naming the bind port.
pub const ENV_PORT: &str = "NFLGATE_PORT";
/// Environment variable suppressing per-request access logging.
pub const ENV_QUIET: &str = "NFLGATE_QUIET";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Configuration error: a variable was set to an unusable value.
#[derive(Debug, Error)]
#[error("invalid {var}: {reason}")]
pub struct ConfigError {
    pub var: String,
    pub reason: String,
}

/// Gateway runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Suppress per-request access logging.
    pub quiet: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            quiet: false,
        }
    }
}

impl GatewayConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var(ENV_HOST).unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match std::env::var(ENV_PORT) {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError {
                var: ENV_PORT.to_string(),
                reason: format!("'{raw}' is not a valid port"),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let quiet = std::env::var(ENV_QUIET)
            .map(|raw| parse_flag(&raw))
            .unwrap_or(false);

        Ok(Self { host, port, quiet })
    }

    /// Socket address string for binding.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
