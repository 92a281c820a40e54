//! Application settings loading from config.toml
//!
//! This module provides the typed settings structure consumed by the deposit
//! validation, state-transition, and maturation logic, plus loading from a
//! TOML configuration file. Every field has a default matching the reference
//! deployment, so an empty or missing `[settings]` table yields a working
//! configuration.

use crate::config::wallets::WalletSeed;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Numeric policy knobs for deposits, maturation, and payouts
    #[serde(default)]
    pub settings: AppSettings,
    /// Deposit wallets to seed into the rotation pool
    #[serde(default)]
    pub wallets: Vec<WalletSeed>,
}

/// Typed application settings with reference-deployment defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Smallest accepted deposit in dollars
    pub min_deposit: f64,
    /// Largest accepted deposit in dollars
    pub max_deposit: f64,
    /// Days between confirmation and maturation
    pub investment_duration_days: i64,
    /// Factor applied to the principal at maturation
    pub payout_multiplier: f64,
    /// Days a referral earning waits before it may be approved
    pub referral_payout_days: i64,
    /// Seconds between maturation scanner passes
    pub scan_interval_secs: u64,
    /// Public site base URL used in referral links
    pub site_url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            min_deposit: 100.0,
            max_deposit: 100_000.0,
            investment_duration_days: 7,
            payout_multiplier: 2.0,
            referral_payout_days: 10,
            scan_interval_secs: 60,
            site_url: "https://doublemoney.pro".to_string(),
        }
    }
}

/// Loads application configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Returns
/// * `Ok(Config)` - Successfully parsed configuration
/// * `Err(Error)` - Failed to read or parse the configuration file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads application configuration from the default location (./config.toml),
/// falling back to built-in defaults when the file is absent.
pub fn load_default_config() -> Result<Config> {
    if Path::new("config.toml").exists() {
        load_config("config.toml")
    } else {
        Ok(Config::default())
    }
}
