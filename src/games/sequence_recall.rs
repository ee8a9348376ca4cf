//! Watch-then-repeat tile sequences.
//!
//! The engine generates a sequence of grid tiles; the caller plays it back
//! (tile timing comes from [`Recall::tile_ms`]) and then forwards the
//! player's taps. A wrong tap resets only the player's progress within the
//! level; the sequence itself is kept and replayed, and the RNG stream is
//! not touched.

use serde::{Deserialize, Serialize};

use crate::core::{GameId, SeededRng};

use super::{
    GameRules, GameView, InputEvent, InputResponse, LevelContext, PlayContext, Progress, Verdict,
};

/// Points per correctly recalled tile.
const TAP_POINTS: u32 = 10;

/// Longest sequence ever generated.
pub const MAX_SEQUENCE_LEN: u32 = 12;

/// The current level's sequence and the player's progress through it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recall {
    /// Grid side length; tiles are `0..grid*grid`.
    pub grid: u32,
    /// Tiles recalled so far this attempt.
    pub entered: u32,
    /// Per-tile playback duration for the caller's replay loop, in ms.
    pub tile_ms: u64,
    sequence: Vec<u32>,
}

impl Recall {
    /// The full sequence, for playback.
    #[must_use]
    pub fn sequence(&self) -> &[u32] {
        &self.sequence
    }

    /// Sequence length.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.sequence.len() as u32
    }

    /// Whether the sequence is empty. Never true for generated levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Rules implementor for the sequence-recall game.
#[derive(Clone, Debug, Default)]
pub struct SequenceRecallGame {
    recall: Option<Recall>,
}

impl SequenceRecallGame {
    /// Create the variant. Content appears on the first `generate_level`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid side for a level: 3, growing to 5 every three levels.
    #[must_use]
    pub fn grid_side(level: u32) -> u32 {
        3 + (level.saturating_sub(1) / 3).min(2)
    }

    fn sequence_len(level: u32, difficulty: u8) -> u32 {
        (2 + level + u32::from(difficulty) / 3).min(MAX_SEQUENCE_LEN)
    }

    fn tile_ms(level: u32, difficulty: u8) -> u64 {
        800u64
            .saturating_sub(u64::from(difficulty) * 30 + u64::from(level) * 20)
            .max(400)
    }
}

impl GameRules for SequenceRecallGame {
    fn game(&self) -> GameId {
        GameId::SequenceRecall
    }

    fn generate_level(&mut self, ctx: &mut LevelContext<'_>) {
        let grid = Self::grid_side(ctx.level);
        let len = Self::sequence_len(ctx.level, ctx.difficulty);
        let tiles = i64::from(grid * grid) - 1;

        let sequence = (0..len)
            .map(|_| ctx.rng.next_int(0, tiles) as u32)
            .collect();

        self.recall = Some(Recall {
            grid,
            entered: 0,
            tile_ms: Self::tile_ms(ctx.level, ctx.difficulty),
            sequence,
        });
    }

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut PlayContext<'_>) -> InputResponse {
        let InputEvent::Tile(tile) = *input else {
            return InputResponse::IGNORED;
        };
        let Some(recall) = self.recall.as_mut() else {
            return InputResponse::IGNORED;
        };
        if tile >= (recall.grid * recall.grid) as usize {
            return InputResponse::IGNORED;
        }

        let expected = recall.sequence[recall.entered as usize];
        if tile as u32 == expected {
            recall.entered += 1;
            let response = InputResponse::of(Verdict::Correct { points: TAP_POINTS });
            if recall.entered == recall.len() {
                let time_bonus = 50u64.saturating_sub(ctx.level_elapsed_secs()) as u32;
                response.clearing(time_bonus)
            } else {
                response
            }
        } else {
            // Back to the start of the same sequence; no regeneration.
            recall.entered = 0;
            InputResponse::of(Verdict::Incorrect { costs_life: true })
        }
    }

    fn handle_timeout(&mut self, _ctx: &mut PlayContext<'_>) -> InputResponse {
        let Some(recall) = self.recall.as_mut() else {
            return InputResponse::IGNORED;
        };
        recall.entered = 0;
        InputResponse::of(Verdict::Incorrect { costs_life: true })
    }

    fn time_limit_ms(&self) -> Option<u64> {
        None
    }

    fn progress(&self) -> Progress {
        match &self.recall {
            Some(recall) => Progress::Sequence {
                entered: recall.entered,
                length: recall.len(),
            },
            None => Progress::Sequence {
                entered: 0,
                length: 0,
            },
        }
    }

    fn view(&self) -> GameView<'_> {
        GameView::SequenceRecall(self.recall.as_ref())
    }
}
