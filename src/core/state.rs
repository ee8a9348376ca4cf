//! Session state owned by one engine instance.
//!
//! Exactly one `GameState` exists per session. The session mutates it; the
//! rendering layer reads it through the observer notifications or
//! `GameSession::state`.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    /// Constructed, not yet initialized.
    Idle,
    /// Initialized and waiting for `start`.
    Ready,
    /// Accepting input.
    Playing,
    /// Lives exhausted. Terminal.
    GameOver,
    /// Final level cleared. Terminal.
    Completed,
}

impl GameStatus {
    /// Whether the session accepts no further input.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Completed)
    }
}

/// Mutable per-session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Lifecycle status.
    pub status: GameStatus,

    /// Current level, `1..=max_level`.
    pub level: u32,

    /// Level count for this game.
    pub max_level: u32,

    /// Score. Non-decreasing while playing.
    pub score: u32,

    /// Remaining lives, `0..=max_lives`.
    pub lives: u32,

    /// Starting life count for this game.
    pub max_lives: u32,

    /// Session start, milliseconds since the Unix epoch. Set by `start`.
    pub started_at: Option<u64>,
}

impl GameState {
    /// Fresh state for a game with the given bounds.
    #[must_use]
    pub fn new(start_level: u32, max_level: u32, max_lives: u32) -> Self {
        debug_assert!((1..=max_level).contains(&start_level));
        Self {
            status: GameStatus::Idle,
            level: start_level,
            max_level,
            score: 0,
            lives: max_lives,
            max_lives,
            started_at: None,
        }
    }
}
