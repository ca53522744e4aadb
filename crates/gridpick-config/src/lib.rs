//! Configuration system for gridpick.
//!
//! Load game configuration from TOML or YAML files to control the shared
//! password gate, the points-table seed, and randomness without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use gridpick_config::GameConfig;
//!
//! let config = GameConfig::from_toml_str(r#"
//!     password = "paddock"
//!     random_seed = 42
//!
//!     [[points_seed]]
//!     position = 1
//!     points = 10
//!
//!     [[points_seed]]
//!     position = 2
//!     points = 6
//! "#).unwrap();
//!
//! assert!(config.verify_password("paddock"));
//! assert_eq!(config.points_table().points_for(1), 10);
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use gridpick_config::GameConfig;
//!
//! let config = GameConfig::load("gridpick.toml").unwrap_or_default();
//! // Proceeds with the seed points table and an open gate
//! assert_eq!(config.points_table().points_for(1), 25);
//! ```

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use gridpick_core::points::PointsTable;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

static GLOBAL: OnceLock<GameConfig> = OnceLock::new();

/// Process-wide game configuration.
///
/// Single-season, single shared password; there are no authorization
/// levels. The config is immutable once installed globally.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GameConfig {
    /// The shared password gating the whole game. `None` leaves the gate
    /// open (first-run behavior).
    #[serde(default)]
    pub password: Option<String>,

    /// Sparse points-table override applied on top of the default seed
    /// table.
    #[serde(default)]
    pub points_seed: Vec<PointsSeedEntry>,

    /// Seed for reproducible pick-order shuffling. Leave unset in
    /// production so tie-breaking stays truly random.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl GameConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the shared password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Overrides points for one position in the seed table.
    pub fn with_points(mut self, position: u32, points: i64) -> Self {
        self.points_seed.push(PointsSeedEntry { position, points });
        self
    }

    /// Checks a candidate against the shared password.
    ///
    /// An unset password accepts anything; the presentation layer is
    /// expected to install a configured password on first run.
    pub fn verify_password(&self, candidate: &str) -> bool {
        match &self.password {
            Some(password) => password == candidate,
            None => true,
        }
    }

    /// The points table this configuration seeds: the default scheme with
    /// any `points_seed` entries applied on top.
    pub fn points_table(&self) -> PointsTable {
        let mut table = PointsTable::default();
        table.apply(self.points_seed.iter().map(|e| (e.position, e.points)));
        table
    }

    /// Installs this configuration as the process-wide instance.
    ///
    /// Returns `Invalid` if a configuration was already installed.
    pub fn install(self) -> Result<(), ConfigError> {
        GLOBAL
            .set(self)
            .map_err(|_| ConfigError::Invalid("global config already installed".into()))
    }

    /// The process-wide configuration, defaulting on first use if
    /// [`GameConfig::install`] was never called.
    pub fn global() -> &'static GameConfig {
        GLOBAL.get_or_init(GameConfig::default)
    }
}

/// One position override in the points seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PointsSeedEntry {
    pub position: u32,
    pub points: i64,
}
