//! Match configuration for the `gs` binary.
//!
//! Everything here can also be set from the command line; flags override
//! the file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub play2048: Play2048Config,
    #[serde(default)]
    pub nogo: NogoConfig,
}

/// Settings for `gs play2048`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Play2048Config {
    #[serde(default = "default_games")]
    pub games: u32,
    /// Property string for the player agent; a weight source (`init` or
    /// `load=<path>`) is mandatory.
    #[serde(default = "default_player")]
    pub player: String,
    /// Property string for the tile environment.
    #[serde(default)]
    pub env: String,
    /// NDJSON log path; absent disables logging.
    #[serde(default)]
    pub log: Option<String>,
}

impl Default for Play2048Config {
    fn default() -> Self {
        Self {
            games: default_games(),
            player: default_player(),
            env: String::new(),
            log: None,
        }
    }
}

/// Settings for `gs nogo`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NogoConfig {
    #[serde(default = "default_games")]
    pub games: u32,
    #[serde(default = "default_black")]
    pub black: String,
    #[serde(default = "default_white")]
    pub white: String,
    #[serde(default)]
    pub log: Option<String>,
}

impl Default for NogoConfig {
    fn default() -> Self {
        Self {
            games: default_games(),
            black: default_black(),
            white: default_white(),
            log: None,
        }
    }
}

fn default_games() -> u32 {
    1
}

fn default_player() -> String {
    "init".to_string()
}

fn default_black() -> String {
    "name=mcts role=black N=1000".to_string()
}

fn default_white() -> String {
    "name=random role=white N=0".to_string()
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
