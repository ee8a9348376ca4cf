//! Construction-time errors.
//!
//! Gameplay itself never fails: out-of-turn or structurally invalid input is
//! a silent no-op by contract. The only fallible surface is building a
//! session from a `GameConfig`, before any state exists.

use thiserror::Error;

use super::config::GameId;

/// Error raised while validating a `GameConfig` at session construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The game id string does not name a registered game.
    #[error("unknown game id: {0}")]
    UnknownGame(String),

    /// Difficulty scalar outside `[1, 10]`.
    #[error("difficulty {0} is out of range (1-10)")]
    DifficultyOutOfRange(u8),

    /// Start-level override outside the game's level range.
    #[error("level {level} is out of range for {game} (1-{max})")]
    LevelOutOfRange {
        game: GameId,
        level: u32,
        max: u32,
    },
}
