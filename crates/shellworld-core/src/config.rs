//! Configuration loading and typed config structures for a Shellworld run.
//!
//! The configuration lives in a YAML file (`shellworld-config.yaml` by
//! default). Every field is optional: a missing section or key falls back
//! to the defaults below, so an empty document is a valid configuration.

use std::path::Path;

use serde::Deserialize;

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

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Grid extent, seed, and run length.
    #[serde(default)]
    pub world: WorldConfig,

    /// Per-shell action limits.
    #[serde(default)]
    pub shell: ShellConfig,

    /// Initial population for the headless runner.
    #[serde(default)]
    pub scenario: ScenarioConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Number of rows; `0` makes the grid unbounded.
    #[serde(default = "default_rows")]
    pub rows: u32,

    /// Number of columns; `0` makes the grid unbounded.
    #[serde(default = "default_cols")]
    pub cols: u32,

    /// Seed for the world's random number generator.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Ticks the headless runner executes.
    #[serde(default = "default_ticks")]
    pub ticks: u64,
}

impl WorldConfig {
    /// Whether the configured grid has no extent.
    pub const fn is_unbounded(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            seed: default_seed(),
            ticks: default_ticks(),
        }
    }
}

/// Limits applied by the action handlers to one shell.
///
/// Each shell carries its own copy, so limits can differ between shells
/// in the same world.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShellConfig {
    /// Half-width of the square neighborhood a shell perceives.
    #[serde(default = "default_perception_radius")]
    pub perception_radius: u32,

    /// Maximum cells a single `Move` covers.
    #[serde(default = "default_max_move_distance")]
    pub max_move_distance: u32,

    /// Maximum reach of a message, in cells.
    #[serde(default = "default_max_message_range")]
    pub max_message_range: f64,

    /// Maximum reach of `CollectCoin`, in cells.
    #[serde(default = "default_max_collect_distance")]
    pub max_collect_distance: f64,

    /// Maximum amount one `CollectCoin` transfers.
    #[serde(default = "default_max_mine_per_tick")]
    pub max_mine_per_tick: i64,

    /// Maximum reach of `Consume`, in cells.
    #[serde(default = "default_max_consume_distance")]
    pub max_consume_distance: f64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            perception_radius: default_perception_radius(),
            max_move_distance: default_max_move_distance(),
            max_message_range: default_max_message_range(),
            max_collect_distance: default_max_collect_distance(),
            max_mine_per_tick: default_max_mine_per_tick(),
            max_consume_distance: default_max_consume_distance(),
        }
    }
}

/// Initial population scattered by the headless runner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScenarioConfig {
    /// Random-walking shells.
    #[serde(default = "default_walkers")]
    pub walkers: u32,

    /// Predator shells.
    #[serde(default = "default_hunters")]
    pub hunters: u32,

    /// Coin-collecting shells.
    #[serde(default = "default_miners")]
    pub miners: u32,

    /// Coins seeded into the bank.
    #[serde(default = "default_coins")]
    pub coins: u32,

    /// Opening balance of every coin.
    #[serde(default = "default_coin_balance")]
    pub coin_balance: i64,

    /// Inert rocks.
    #[serde(default = "default_rocks")]
    pub rocks: u32,

    /// Flowers.
    #[serde(default)]
    pub flowers: u32,

    /// Plain bugs.
    #[serde(default)]
    pub bugs: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            walkers: default_walkers(),
            hunters: default_hunters(),
            miners: default_miners(),
            coins: default_coins(),
            coin_balance: default_coin_balance(),
            rocks: default_rocks(),
            flowers: 0,
            bugs: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_rows() -> u32 {
    20
}

const fn default_cols() -> u32 {
    20
}

const fn default_seed() -> u64 {
    42
}

const fn default_ticks() -> u64 {
    100
}

const fn default_perception_radius() -> u32 {
    3
}

const fn default_max_move_distance() -> u32 {
    1
}

const fn default_max_message_range() -> f64 {
    5.0
}

const fn default_max_collect_distance() -> f64 {
    1.0
}

const fn default_max_mine_per_tick() -> i64 {
    5
}

const fn default_max_consume_distance() -> f64 {
    1.5
}

const fn default_walkers() -> u32 {
    4
}

const fn default_hunters() -> u32 {
    2
}

const fn default_miners() -> u32 {
    3
}

const fn default_coins() -> u32 {
    6
}

const fn default_coin_balance() -> i64 {
    10
}

const fn default_rocks() -> u32 {
    5
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.world.rows, 20);
        assert_eq!(config.shell.perception_radius, 3);
        assert_eq!(config.shell.max_move_distance, 1);
        assert_eq!(config.shell.max_mine_per_tick, 5);
        assert!(!config.world.is_unbounded());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = SimulationConfig::parse("").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = r"
world:
  rows: 0
  seed: 7
shell:
  max_move_distance: 3
scenario:
  bugs: 2
";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert!(config.world.is_unbounded());
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.cols, 20);
        assert_eq!(config.shell.max_move_distance, 3);
        assert_eq!(config.shell.perception_radius, 3);
        assert_eq!(config.scenario.bugs, 2);
        assert_eq!(config.scenario.walkers, 4);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let result = SimulationConfig::parse("world: [1, 2");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = SimulationConfig::from_file(Path::new("/nonexistent/shellworld.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
