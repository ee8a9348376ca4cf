//! Session configuration: game selection, seeding, difficulty.
//!
//! A `GameConfig` is the immutable input to a play session. The surrounding
//! app builds one per session: a daily challenge passes the date-derived
//! seed from [`crate::core::game_seed`], free play omits the seed entirely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Identifier for a shipped game variant.
///
/// The string form (`as_str`) is stable: it feeds daily-seed derivation and
/// is the id the app layer stores and routes on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameId {
    /// Mental arithmetic under time pressure.
    Arithmetic,
    /// Color/word conflict (Stroop) challenges.
    Stroop,
    /// Face-down pair matching.
    MemoryPairs,
    /// Watch-then-repeat tile sequences.
    SequenceRecall,
}

impl GameId {
    /// All shipped games, in catalog order.
    pub const ALL: [GameId; 4] = [
        GameId::Arithmetic,
        GameId::Stroop,
        GameId::MemoryPairs,
        GameId::SequenceRecall,
    ];

    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameId::Arithmetic => "arithmetic",
            GameId::Stroop => "stroop",
            GameId::MemoryPairs => "memory-pairs",
            GameId::SequenceRecall => "sequence-recall",
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| EngineError::UnknownGame(s.to_string()))
    }
}

/// Catalog grouping stamped into results for the stats layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Math,
    Attention,
    Memory,
}

/// Lowest difficulty scalar.
pub const MIN_DIFFICULTY: u8 = 1;
/// Highest difficulty scalar.
pub const MAX_DIFFICULTY: u8 = 10;
/// Difficulty used when the config does not specify one.
pub const DEFAULT_DIFFICULTY: u8 = 5;

/// Immutable session input.
///
/// ## Example
///
/// ```
/// use brainplay::{GameConfig, GameId};
///
/// let config = GameConfig::new(GameId::Arithmetic)
///     .with_seed(42)
///     .with_difficulty(7);
///
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Which game to play.
    pub game: GameId,

    /// Explicit stream seed. `None` means a non-reproducible session.
    pub seed: Option<u32>,

    /// Difficulty scalar in `[1, 10]`. `None` means [`DEFAULT_DIFFICULTY`].
    pub difficulty: Option<u8>,

    /// Start at a later level (practice / continue flows).
    pub start_level: Option<u32>,
}

impl GameConfig {
    /// Create a config with no seed, default difficulty, level 1.
    #[must_use]
    pub fn new(game: GameId) -> Self {
        Self {
            game,
            seed: None,
            difficulty: None,
            start_level: None,
        }
    }

    /// Set an explicit seed; the session becomes fully reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the difficulty scalar.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Override the starting level.
    #[must_use]
    pub fn with_start_level(mut self, level: u32) -> Self {
        self.start_level = Some(level);
        self
    }

    /// Difficulty with the default applied.
    #[must_use]
    pub fn difficulty_or_default(&self) -> u8 {
        self.difficulty.unwrap_or(DEFAULT_DIFFICULTY)
    }

    /// Validate the fields that do not need a registry entry.
    ///
    /// The start-level bound is checked against the game's `max_level` at
    /// session construction.
    pub fn validate(&self) -> Result<(), EngineError> {
        if let Some(d) = self.difficulty {
            if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&d) {
                return Err(EngineError::DifficultyOutOfRange(d));
            }
        }
        if self.start_level == Some(0) {
            return Err(EngineError::LevelOutOfRange {
                game: self.game,
                level: 0,
                max: 0,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_id_round_trip() {
        for id in GameId::ALL {
            assert_eq!(id.as_str().parse::<GameId>().unwrap(), id);
            assert_eq!(format!("{id}"), id.as_str());
        }
    }

    #[test]
    fn test_unknown_game_id() {
        let err = "sudoku".parse::<GameId>().unwrap_err();
        assert_eq!(err, EngineError::UnknownGame("sudoku".to_string()));
    }

    #[test]
    fn test_config_builder() {
        let config = GameConfig::new(GameId::Stroop)
            .with_seed(7)
            .with_difficulty(3)
            .with_start_level(2);

        assert_eq!(config.game, GameId::Stroop);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.difficulty, Some(3));
        assert_eq!(config.start_level, Some(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_difficulty_default() {
        let config = GameConfig::new(GameId::Arithmetic);
        assert_eq!(config.difficulty_or_default(), DEFAULT_DIFFICULTY);
    }

    #[test]
    fn test_difficulty_out_of_range() {
        let config = GameConfig::new(GameId::Arithmetic).with_difficulty(11);
        assert_eq!(
            config.validate().unwrap_err(),
            EngineError::DifficultyOutOfRange(11)
        );

        let config = GameConfig::new(GameId::Arithmetic).with_difficulty(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_start_level_zero_rejected() {
        let config = GameConfig::new(GameId::Arithmetic).with_start_level(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_game_id_serde_form() {
        let json = serde_json::to_string(&GameId::MemoryPairs).unwrap();
        assert_eq!(json, "\"memory-pairs\"");
    }
}
