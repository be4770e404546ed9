//! CLI-specific error types

use thiserror::Error;

use crate::config::ConfigError;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration could not be resolved
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Runtime or server I/O failure
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Output serialization failure
    #[error("{0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::from(ConfigError {
            var: "NFLGATE_PORT".to_string(),
            reason: "'abc' is not a valid port".to_string(),
        });
        let message = err.to_string();
        assert!(message.contains("NFLGATE_PORT"));
        assert!(message.contains("not a valid port"));
    }
}
