use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{Dimensions, Player, TerminationOrder, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Board and rule settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    /// Which check wins when the final piece both fills the board and
    /// completes a run
    pub termination_order: TerminationOrder,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            termination_order: TerminationOrder::WinFirst,
        }
    }
}

impl GameConfig {
    pub fn dimensions(&self) -> Result<Dimensions, ConfigError> {
        Dimensions::new(self.height, self.width)
            .map_err(|e| ConfigError::Validation(format!("game: {e}")))
    }
}

/// Player identity tokens, usually colour names.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub first: String,
    pub second: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        PlayersConfig {
            first: "red".to_string(),
            second: "yellow".to_string(),
        }
    }
}

impl PlayersConfig {
    pub fn players(&self) -> (Player, Player) {
        (Player::new(self.first.clone()), Player::new(self.second.clone()))
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub players: PlayersConfig,
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
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.height == 0 {
            return Err(ConfigError::Validation("game.height must be >= 1".into()));
        }
        if self.game.width == 0 {
            return Err(ConfigError::Validation("game.width must be >= 1".into()));
        }
        self.game.dimensions()?;
        if self.players.first.trim().is_empty() {
            return Err(ConfigError::Validation(
                "players.first must not be empty".into(),
            ));
        }
        if self.players.second.trim().is_empty() {
            return Err(ConfigError::Validation(
                "players.second must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
