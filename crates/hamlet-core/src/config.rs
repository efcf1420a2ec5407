//! Configuration loading and typed config structures for the economy.
//!
//! The canonical configuration lives in `hamlet-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure and provides two loaders: a strict one that
//! reports parse failures, and [`GameConfig::load_or_default`], which
//! degrades to defaults with a logged warning so a missing data source
//! never halts the game (the ledger simply starts empty).

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use hamlet_types::{Achievement, BuildingTypeId, Goal, ResourceDefinition, ResourceId};

use crate::production::ProductionRule;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `hamlet-config.yaml`. Every section has a
/// default so a partial file is always accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameConfig {
    /// World-level settings (name, tick timing, bounds).
    #[serde(default)]
    pub world: WorldConfig,

    /// The resource whose ledger level is the settlement's population.
    #[serde(default = "default_population_resource")]
    pub population_resource: ResourceId,

    /// Resource definitions table: id, starting amount, max storage.
    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,

    /// Per-job production rules applied each tick.
    #[serde(default)]
    pub production: Vec<ProductionRule>,

    /// Goal table. Goals are created once, uncompleted, at session start.
    #[serde(default)]
    pub goals: Vec<Goal>,

    /// Achievement table (registry only; triggers are not wired).
    #[serde(default)]
    pub achievements: Vec<Achievement>,

    /// Building kinds constructible from the very start.
    #[serde(default)]
    pub starting_unlocks: Vec<BuildingTypeId>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            population_resource: default_population_resource(),
            resources: Vec::new(),
            production: Vec::new(),
            goals: Vec::new(),
            achievements: Vec::new(),
            starting_unlocks: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration, degrading to defaults on any failure.
    ///
    /// A missing or malformed data source is a startup-level problem,
    /// not a fatal one: the failure is logged and the returned defaults
    /// leave every component usably empty (all resource reads are zero,
    /// no goals, no production).
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(error) => {
                warn!(path = %path.display(), %error, "config unavailable, starting with empty defaults");
                Self::default()
            }
        }
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable settlement name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Maximum number of ticks before the runner stops (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_population_resource() -> ResourceId {
    ResourceId::new("population")
}

fn default_world_name() -> String {
    "New Hamlet".to_owned()
}

const fn default_tick_interval_ms() -> u64 {
    1_000
}

fn default_log_level() -> String {
    "info".to_owned()
}
