//! # Store Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GRIDDLE_STORE_NAME="Good Griddle"                                  │
//! │     GRIDDLE_CURRENCY_SYMBOL=R$                                         │
//! │     GRIDDLE_SEED_CATALOG=false                                         │
//! │     GRIDDLE_SEED_DEFAULT_RULES=true                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/griddle/griddle.toml (Linux)                             │
//! │     ~/Library/Application Support/com.griddle.griddle/griddle.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Good Griddle"
//!
//! [display]
//! currency_symbol = "$"
//!
//! [seed]
//! catalog = true
//! default_rules = true
//! ```

use std::path::PathBuf;

use griddle_core::Money;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Shown in logs and on receipts.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Griddle".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// What to load into an empty store at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSettings {
    /// Demo categories, products and combo discounts.
    #[serde(default = "default_true")]
    pub catalog: bool,

    /// House quantity rules (one sandwich, fries and soft drink per order).
    #[serde(default = "default_true")]
    pub default_rules: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SeedSettings {
    fn default() -> Self {
        SeedSettings {
            catalog: true,
            default_rules: true,
        }
    }
}

// =============================================================================
// Store Configuration
// =============================================================================

/// Complete configuration for a griddle store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub seed: SeedSettings,
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (griddle.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
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
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the configuration as pretty TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(default_config_path)
            .ok_or_else(|| StoreError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Store config saved");
        Ok(())
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(StoreError::Config("store.name cannot be empty".into()));
        }

        if self.display.currency_symbol.trim().is_empty() {
            return Err(StoreError::Config(
                "display.currency_symbol cannot be empty".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("GRIDDLE_STORE_NAME") {
            debug!(name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Ok(symbol) = std::env::var("GRIDDLE_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }

        if let Ok(value) = std::env::var("GRIDDLE_SEED_CATALOG") {
            match parse_flag(&value) {
                Some(flag) => self.seed.catalog = flag,
                None => warn!(value = %value, "Ignoring GRIDDLE_SEED_CATALOG"),
            }
        }

        if let Ok(value) = std::env::var("GRIDDLE_SEED_DEFAULT_RULES") {
            match parse_flag(&value) {
                Some(flag) => self.seed.default_rules = flag,
                None => warn!(value = %value, "Ignoring GRIDDLE_SEED_DEFAULT_RULES"),
            }
        }
    }

    /// Renders an amount with the configured currency symbol.
    pub fn format_money(&self, money: Money) -> String {
        let amount = money.round_to_cents().amount();
        let sign = if amount.is_sign_negative() && !amount.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{}{:.2}", sign, self.display.currency_symbol, amount.abs())
    }
}

/// `<config dir>/griddle.toml` for the current platform.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "griddle", "griddle")
        .map(|dirs| dirs.config_dir().join("griddle.toml"))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: StoreConfig = toml::from_str(
            r#"
            [display]
            currency_symbol = "R$"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.name, "Griddle");
        assert_eq!(config.display.currency_symbol, "R$");
        assert!(config.seed.catalog);
        assert!(config.seed.default_rules);
    }

    #[test]
    fn test_full_file() {
        let config: StoreConfig = toml::from_str(
            r#"
            [store]
            name = "Good Griddle"

            [seed]
            catalog = true
            default_rules = false
            "#,
        )
        .unwrap();

        assert_eq!(config.store.name, "Good Griddle");
        assert!(!config.seed.default_rules);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_values() {
        let mut config = StoreConfig::default();
        config.display.currency_symbol = " ".into();
        assert!(matches!(config.validate(), Err(StoreError::Config(_))));

        let mut config = StoreConfig::default();
        config.store.name.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let mut config = StoreConfig::default();
        config.store.name = "Night Shift".into();

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: StoreConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_format_money() {
        let mut config = StoreConfig::default();
        assert_eq!(config.format_money(Money::from_cents(960)), "$9.60");

        config.display.currency_symbol = "R$".into();
        assert_eq!(config.format_money(Money::from_cents(-250)), "-R$2.50");
        assert_eq!(config.format_money(Money::zero()), "R$0.00");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
