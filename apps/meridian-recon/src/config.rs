//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                     │
//! │     --format text                                                       │
//! │                                                                         │
//! │  2. Environment Variables                                               │
//! │     MERIDIAN_SPLIT_TOLERANCE=0.05                                       │
//! │     MERIDIAN_CURRENCY_SYMBOL=€                                          │
//! │                                                                         │
//! │  3. TOML Config File                                                    │
//! │     --config <PATH>, else                                               │
//! │     ~/.config/recon/recon.toml (Linux)                                  │
//! │     ~/Library/Application Support/com.meridian.recon/recon.toml (macOS) │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! │     tolerance 0.01, USD, $, 2 decimals, json                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # recon.toml
//! [engine]
//! split_tolerance = "0.01"
//!
//! [display]
//! currency_code = "KES"
//! currency_symbol = "KSh "
//! currency_decimals = 2
//!
//! [output]
//! format = "text"  # json | text
//! ```

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use meridian_core::{EngineConfig, Money, DEFAULT_SPLIT_TOLERANCE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};

/// Largest supported number of displayed decimals.
pub const MAX_CURRENCY_DECIMALS: u8 = 4;

// =============================================================================
// Settings Sections
// =============================================================================

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON results, same shape as the input.
    #[default]
    Json,
    /// Human-readable breakdown per draft.
    Text,
}

/// `[engine]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Largest accepted gap between split rows and the stated tender.
    #[serde(default = "default_split_tolerance")]
    pub split_tolerance: Decimal,
}

fn default_split_tolerance() -> Decimal {
    DEFAULT_SPLIT_TOLERANCE.amount()
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            split_tolerance: default_split_tolerance(),
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// ISO 4217 code, shown in the text report header.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub engine: EngineSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform `recon.toml` if present)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with(config_path, |var| std::env::var(var).ok())
    }

    /// [`CliConfig::load`] with a custom environment lookup.
    pub fn load_with<F>(config_path: Option<&Path>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file. Missing sections and keys take defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading reconciliation config from file");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.engine.split_tolerance < Decimal::ZERO {
            return Err(ConfigError::Invalid(format!(
                "split_tolerance must not be negative, got {}",
                self.engine.split_tolerance
            )));
        }

        let code = &self.display.currency_code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Invalid(format!(
                "currency_code must be three uppercase letters, got {:?}",
                code
            )));
        }

        if self.display.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most {}, got {}",
                MAX_CURRENCY_DECIMALS, self.display.currency_decimals
            )));
        }

        Ok(())
    }

    /// Applies `MERIDIAN_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Split tolerance
        if let Some(value) = lookup("MERIDIAN_SPLIT_TOLERANCE") {
            self.engine.split_tolerance =
                value
                    .trim()
                    .parse::<Decimal>()
                    .map_err(|_| ConfigError::InvalidEnv {
                        var: "MERIDIAN_SPLIT_TOLERANCE",
                        value: value.clone(),
                    })?;
            debug!(tolerance = %self.engine.split_tolerance, "Overriding split tolerance from environment");
        }

        // Currency symbol
        if let Some(symbol) = lookup("MERIDIAN_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }

        // Currency decimals
        if let Some(value) = lookup("MERIDIAN_CURRENCY_DECIMALS") {
            self.display.currency_decimals =
                value
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| ConfigError::InvalidEnv {
                        var: "MERIDIAN_CURRENCY_DECIMALS",
                        value: value.clone(),
                    })?;
        }

        // Output format
        if let Some(value) = lookup("MERIDIAN_OUTPUT_FORMAT") {
            self.output.format = OutputFormat::from_str(value.trim(), true).map_err(|_| {
                ConfigError::InvalidEnv {
                    var: "MERIDIAN_OUTPUT_FORMAT",
                    value: value.clone(),
                }
            })?;
            debug!(format = ?self.output.format, "Overriding output format from environment");
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "meridian", "recon")
            .map(|dirs| dirs.config_dir().join("recon.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Engine settings for [`meridian_core::ReconciliationEngine::new`].
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            split_tolerance: Money::new(self.engine.split_tolerance),
        }
    }

    /// Formats an amount with the configured symbol and decimals.
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::Money;
    /// use meridian_recon::config::CliConfig;
    ///
    /// let config = CliConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}",
            if amount.is_negative() { "-" } else { "" },
            self.display.currency_symbol,
            amount.abs().to_fixed(u32::from(self.display.currency_decimals))
        )
    }
}
