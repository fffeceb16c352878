//! Application configuration loading from config.toml
//!
//! The file provides the built-in category list and optional sample data used to
//! seed an empty store on first run. Every section is optional; a missing file
//! yields [`AppConfig::default`].

use crate::core::category::BUILT_IN_CATEGORIES;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Built-in categories offered alongside user tags
    pub categories: Vec<String>,
    /// Sample data inserted when the store is empty
    pub seed: SeedConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            categories: BUILT_IN_CATEGORIES.iter().map(ToString::to_string).collect(),
            seed: SeedConfig::default(),
        }
    }
}

/// Sample records for first launch
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Balances inserted when no balance exists
    pub balances: Vec<SeedBalance>,
    /// Groups inserted when no group exists
    pub groups: Vec<SeedGroup>,
}

/// Configuration for a single sample balance
#[derive(Debug, Clone, Deserialize)]
pub struct SeedBalance {
    /// Amount in dollars
    pub amount: f64,
    /// What the debt is for
    pub description: String,
    /// Whether the other person owes the user
    pub is_owed_to_me: bool,
    /// Name of the other party
    pub other_person_name: String,
    /// Tags attached to the balance
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Configuration for a single sample group
#[derive(Debug, Clone, Deserialize)]
pub struct SeedGroup {
    /// Group name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Loads application configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Loading configuration from {path_ref:?}");
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {path_ref:?}: {e}"),
    })
}

/// Loads configuration from `PAYBOB_CONFIG` (default `./config.toml`).
///
/// A missing file is not an error: the defaults are returned and a warning is logged.
/// A file that exists but cannot be parsed is an error.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("PAYBOB_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        warn!("Config file {path} not found, using defaults");
        return Ok(AppConfig::default());
    }
    load_config(&path)
}
