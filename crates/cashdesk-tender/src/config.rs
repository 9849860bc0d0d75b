//! # Tender Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     CASHDESK_ERROR_MARKER=" ERR "                                       │
//! │     CASHDESK_CURRENCY_SYMBOL="€"                                        │
//! │     CASHDESK_STRICT_CONFIRM=true                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/cashdesk/tender.toml (Linux)                              │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [display]
//! error_marker = " Err "
//! currency_symbol = "€"
//!
//! [behavior]
//! strict_confirm = false
//! ```

use cashdesk_core::{Money, ERROR_MARKER};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{TenderError, TenderResult};

// =============================================================================
// Display Settings
// =============================================================================

/// How amounts and errors are presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Shown in place of the change amount while the tendered text is invalid.
    #[serde(default = "default_error_marker")]
    pub error_marker: String,

    /// Appended to amounts by views that render a currency.
    #[serde(default)]
    pub currency_symbol: String,
}

fn default_error_marker() -> String {
    ERROR_MARKER.to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            error_marker: default_error_marker(),
            currency_symbol: String::new(),
        }
    }
}

// =============================================================================
// Behavior Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorSettings {
    /// When set, a confirm request with insufficient funds is ignored even
    /// if it comes from the confirm control. Off by default: the control's
    /// enabled state is then the only gate on that path.
    #[serde(default)]
    pub strict_confirm: bool,
}

// =============================================================================
// Main Tender Configuration
// =============================================================================

/// Complete tender configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderConfig {
    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,
}

impl TenderConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (tender.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> TenderResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading tender config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load tender config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> TenderResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| TenderError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Tender config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> TenderResult<()> {
        let marker = &self.display.error_marker;

        if marker.trim().is_empty() {
            return Err(TenderError::InvalidConfig(
                "error_marker must not be blank".into(),
            ));
        }

        // The marker replaces a numeric value; it must never read as one
        if Money::is_value_valid(marker) {
            return Err(TenderError::InvalidConfig(format!(
                "error_marker must not look like an amount, got: {:?}",
                marker
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(marker) = lookup("CASHDESK_ERROR_MARKER") {
            debug!(marker = %marker, "Overriding error marker from environment");
            self.display.error_marker = marker;
        }

        if let Some(symbol) = lookup("CASHDESK_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }

        if let Some(flag) = lookup("CASHDESK_STRICT_CONFIRM") {
            match parse_flag(&flag) {
                Some(strict) => {
                    debug!(strict, "Overriding strict confirm from environment");
                    self.behavior.strict_confirm = strict;
                }
                None => warn!(value = %flag, "Unknown CASHDESK_STRICT_CONFIRM value"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cashdesk", "cashdesk")
            .map(|dirs| dirs.config_dir().join("tender.toml"))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
