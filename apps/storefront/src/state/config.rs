//! # Configuration State
//!
//! Storefront settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PLANETA_*`)
//! 2. Config file (`storefront.toml`)
//! 3. Defaults (this file)
//!
//! ## Config File Location
//! `PLANETA_CONFIG` if set, otherwise the platform config directory:
//! - **Linux**: `~/.config/planeta-storefront/storefront.toml`
//! - **macOS**: `~/Library/Application Support/br.planeta.storefront/storefront.toml`
//! - **Windows**: `%APPDATA%\planeta\storefront\config\storefront.toml`
//!
//! ## Example
//! ```toml
//! store_name = "Planeta Shop"
//! shipping_fee_cents = 1500
//! free_shipping_threshold_cents = 10000
//! decrement_policy = "floor_at_one"
//! ```
//!
//! Configuration is read-only after initialization, so no mutex is needed.

use planeta_core::money::CURRENCY_SYMBOL;
use planeta_core::{DecrementPolicy, Money, ShippingPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};
use ts_rs::TS;

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ConfigState {
    /// Store name shown in the header
    pub store_name: String,

    /// Currency symbol used in every price label
    pub currency_symbol: String,

    /// Flat shipping fee in centavos
    pub shipping_fee_cents: i64,

    /// Subtotal (centavos) from which shipping is free
    pub free_shipping_threshold_cents: i64,

    /// What (−) does on a single-unit line
    #[ts(type = "\"remove_at_zero\" | \"floor_at_one\"")]
    pub decrement_policy: DecrementPolicy,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Planeta Shop"
    /// - Currency: R$
    /// - Shipping: R$ 10,00, free from R$ 50,00
    /// - Decrement: remove at zero
    fn default() -> Self {
        ConfigState {
            store_name: "Planeta Shop".to_string(),
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            shipping_fee_cents: 1000,
            free_shipping_threshold_cents: 5000,
            decrement_policy: DecrementPolicy::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration: defaults, then file, then environment, then
    /// validation.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var("PLANETA_CONFIG").ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration, falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Applies `PLANETA_*` overrides from a key lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("PLANETA_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(fee) = lookup("PLANETA_SHIPPING_FEE") {
            match fee.parse::<i64>() {
                Ok(cents) => {
                    debug!(cents, "Overriding shipping fee from environment");
                    self.shipping_fee_cents = cents;
                }
                Err(_) => warn!(value = %fee, "Ignoring non-numeric PLANETA_SHIPPING_FEE"),
            }
        }

        if let Some(threshold) = lookup("PLANETA_FREE_SHIPPING_THRESHOLD") {
            match threshold.parse::<i64>() {
                Ok(cents) => self.free_shipping_threshold_cents = cents,
                Err(_) => warn!(
                    value = %threshold,
                    "Ignoring non-numeric PLANETA_FREE_SHIPPING_THRESHOLD"
                ),
            }
        }

        if let Some(policy) = lookup("PLANETA_DECREMENT_POLICY") {
            match policy.parse() {
                Ok(parsed) => self.decrement_policy = parsed,
                Err(e) => warn!(error = %e, "Ignoring PLANETA_DECREMENT_POLICY"),
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        if self.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("currency_symbol must not be empty".into()));
        }

        if self.shipping_fee_cents < 0 || self.free_shipping_threshold_cents < 0 {
            return Err(ConfigError::Invalid(
                "shipping amounts must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Shipping rule derived from the configured amounts.
    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy {
            flat_fee: Money::from_cents(self.shipping_fee_cents),
            free_threshold: Money::from_cents(self.free_shipping_threshold_cents),
        }
    }

    /// Formats an amount with the configured currency symbol.
    pub fn format(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("br", "planeta", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
