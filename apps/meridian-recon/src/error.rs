//! # CLI Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  recon.toml / MERIDIAN_* ──► ConfigError ──┐                            │
//! │                                            │                            │
//! │  drafts.json / stdin ──► Input / Io ───────┼──► CliError ──► stderr     │
//! │                                            │                 exit 1     │
//! │  malformed draft ──► CoreError ────────────┤                            │
//! │                                            │                            │
//! │  report encoding ──► Json ─────────────────┘                            │
//! │                                                                         │
//! │  Failures inside a draft are NOT errors: they go in the report.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use meridian_core::CoreError;
use thiserror::Error;

/// Result type alias for the CLI.
pub type CliResult<T> = Result<T, CliError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything that stops a batch from being reconciled.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading stdin or writing stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed draft or invalid engine settings.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Report could not be encoded.
    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An environment override could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    /// A setting is out of its allowed range.
    #[error("{0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvalidEnv {
            var: "MERIDIAN_CURRENCY_DECIMALS",
            value: "two".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for MERIDIAN_CURRENCY_DECIMALS: \"two\""
        );

        let err = CliError::from(CoreError::InvalidArgument("expected an object".into()));
        assert_eq!(err.to_string(), "Invalid argument: expected an object");
    }

    #[test]
    fn test_config_error_wraps() {
        let err = CliError::from(ConfigError::Invalid("currency_decimals must be at most 4".into()));
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
