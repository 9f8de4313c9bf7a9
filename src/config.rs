//! Game configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to
//! [`GameConfig::default`]. The configuration is handed to
//! [`Session::new`](crate::game::Session::new) and never stored globally.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{PlayerId, Variant};
use crate::game::PlayMode;

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Starting layout
    pub variant: Variant,
    pub play_mode: PlayMode,
    /// Points needed to win a match
    pub match_score: u32,
    /// Starting stake in money play
    pub initial_stakes: u32,
    /// Disable the cube in the game after a side reaches match point
    pub crawford_rule: bool,
    /// Double the stakes on every tied opening roll
    pub murphy_rule: bool,
    /// Side played by the computer, `None` for two humans
    pub ai_side: PlayerId,
    /// Pause between animated AI moves
    pub move_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Standard,
            play_mode: PlayMode::Match,
            match_score: 3,
            initial_stakes: 1,
            crawford_rule: false,
            murphy_rule: false,
            ai_side: PlayerId::Player2,
            move_delay_ms: 600,
        }
    }
}

impl GameConfig {
    /// Read a configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether one side is computer-controlled
    #[inline]
    pub fn has_ai(&self) -> bool {
        !self.ai_side.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = GameConfig::from_json(
            r#"{ "variant": "Rush", "play_mode": "Money", "initial_stakes": 5, "ai_side": "None" }"#,
        )
        .unwrap();
        assert_eq!(config.variant, Variant::Rush);
        assert_eq!(config.play_mode, PlayMode::Money);
        assert_eq!(config.initial_stakes, 5);
        assert_eq!(config.match_score, 3);
        assert!(!config.has_ai());
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            GameConfig::from_json("{ \"match_score\": \"seven\" }"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            GameConfig::load("/nonexistent/backgammon.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = GameConfig {
            murphy_rule: true,
            match_score: 7,
            ..GameConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
