//! Terminal session summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::config::{Category, GameId};

/// Immutable record produced exactly once, when a session ends.
///
/// The stats/streak/badge layers consume this; the engine only produces it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    /// Which game was played.
    pub game: GameId,

    /// Catalog grouping of the game.
    pub category: Category,

    /// Final score including level bonuses.
    pub score: u32,

    /// Judged-correct ratio in `[0, 1]`.
    pub accuracy: f64,

    /// Fully cleared levels. Equals `max_level` on completion.
    pub levels_completed: u32,

    /// Level count of the game.
    pub max_level: u32,

    /// Wall time from `start` to the terminal transition.
    pub duration_ms: u64,

    /// UTC calendar day the session ended on.
    pub date: NaiveDate,
}
