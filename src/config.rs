//! Bot configuration read from `Bot.toml`.
//!
//! Every field has a built-in default, so a partial file (or no file at all)
//! still yields a usable configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mcts::MCTSConfig;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "Bot.toml";

/// Errors raised while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Side length of both the meta-board and every sub-board.
    pub board_size: usize,

    /// Search parameters.
    pub search: MCTSConfig,

    /// Turn timing.
    pub driver: DriverConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            board_size: 3,
            search: MCTSConfig::default(),
            driver: DriverConfig::default(),
        }
    }
}

/// Per-turn time budgets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Search budget for every turn after the first.
    pub turn_budget_ms: u64,

    /// Search budget for the first turn, which the judge allows more time.
    pub first_turn_budget_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            turn_budget_ms: 80,
            first_turn_budget_ms: 80,
        }
    }
}

impl BotConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load `Bot.toml` from the working directory.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_file(DEFAULT_CONFIG_PATH)
    }

    /// Load `Bot.toml`, falling back to built-in defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("{}, using built-in defaults", e);
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcts::Backpropagation;

    #[test]
    fn test_default_config() {
        let config = BotConfig::default();
        assert_eq!(config.board_size, 3);
        assert_eq!(config.search.workers, 4);
        assert_eq!(config.driver.turn_budget_ms, 80);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: BotConfig = toml::from_str(
            r#"
            [search]
            workers = 2
            backpropagation = "alternating"

            [driver]
            first_turn_budget_ms = 900
            "#,
        )
        .unwrap();

        assert_eq!(config.board_size, 3);
        assert_eq!(config.search.workers, 2);
        assert_eq!(config.search.exploration_constant, 1.0);
        assert_eq!(config.search.backpropagation, Backpropagation::Alternating);
        assert_eq!(config.driver.turn_budget_ms, 80);
        assert_eq!(config.driver.first_turn_budget_ms, 900);
    }

    #[test]
    fn test_bundled_file_matches_defaults() {
        // Bot.toml ships with the crate and should mirror the built-in values.
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/Bot.toml");
        let config = BotConfig::from_file(path).expect("Bot.toml should be parseable");
        assert_eq!(config, BotConfig::default());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = BotConfig::from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("ultimate-mcts-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Bot.toml");
        fs::write(&path, "board_size = \"three\"").unwrap();

        let err = BotConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        fs::remove_dir_all(&dir).unwrap();
    }
}
