use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::ai::SearchConfig;
use crate::error::ConfigError;
use crate::game::{Player, COLS, ROWS};

/// Who the search agent plays against in headless matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    Random,
    Search,
}

/// Game setup shared by the interactive and headless front-ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side played by the computer in interactive games.
    pub ai_player: Player,
    /// Opponent of the search agent in headless matches.
    pub opponent: OpponentKind,
    /// Number of headless games to play.
    pub games: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            ai_player: Player::Red,
            opponent: OpponentKind::Random,
            games: 10,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub game: GameConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.time_budget_ms == 0 {
            return Err(ConfigError::Validation(
                "search.time_budget_ms must be > 0".into(),
            ));
        }
        if self.search.depth_slack > COLS * ROWS {
            return Err(ConfigError::Validation(format!(
                "search.depth_slack must be <= {}",
                COLS * ROWS
            )));
        }
        if self.search.max_depth == Some(0) {
            return Err(ConfigError::Validation(
                "search.max_depth must be >= 1".into(),
            ));
        }
        if self.game.games == 0 {
            return Err(ConfigError::Validation("game.games must be > 0".into()));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
