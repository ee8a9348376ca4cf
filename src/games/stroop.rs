//! Color/word conflict challenges.
//!
//! A color name is shown rendered in some ink color; the player must tap the
//! ink color, not the word. Early levels are mostly congruent (word and ink
//! agree); the conflict probability and the number of answer options both
//! grow with level.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameId, SeededRng};

use super::{
    batch_bonus, GameRules, GameView, InputEvent, InputResponse, LevelContext, PlayContext,
    Progress, Verdict,
};

/// Challenges per level.
pub const CHALLENGES_PER_LEVEL: u32 = 5;

/// Base points for a correct tap.
const BASE_POINTS: u32 = 20;

/// A displayable color: name for the word, hex for the ink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PaletteColor {
    pub name: &'static str,
    pub hex: &'static str,
}

/// The fixed palette words and inks are drawn from.
pub const PALETTE: [PaletteColor; 6] = [
    PaletteColor { name: "red", hex: "#e53935" },
    PaletteColor { name: "blue", hex: "#1e88e5" },
    PaletteColor { name: "green", hex: "#43a047" },
    PaletteColor { name: "yellow", hex: "#fdd835" },
    PaletteColor { name: "purple", hex: "#8e24aa" },
    PaletteColor { name: "orange", hex: "#fb8c00" },
];

/// One challenge: a word, the ink it is rendered in, and the offered
/// options. All three are palette indices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Palette index of the displayed word.
    pub word: usize,
    /// Palette index of the ink color. Tapping this is correct.
    pub ink: usize,
    /// Palette indices offered as answers; contains `ink` exactly once.
    pub options: SmallVec<[usize; 4]>,
}

/// Rules implementor for the color/word conflict game.
#[derive(Clone, Debug, Default)]
pub struct StroopGame {
    challenge: Option<Challenge>,
    answered: u32,
    correct: u32,
    level: u32,
    difficulty: u8,
}

impl StroopGame {
    /// Create the variant. Content appears on the first `generate_level`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Probability that word and ink agree. Shrinks with level, floored at
    /// 0.1 so a congruent trial stays possible everywhere.
    fn congruent_probability(level: u32) -> f64 {
        (0.5 - f64::from(level) * 0.05).max(0.1)
    }

    /// Offered answer count: 2 at the start, 4 from level 7.
    fn option_count(level: u32) -> usize {
        (2 + (level.saturating_sub(1) / 3) as usize).min(4)
    }

    fn next_challenge(&mut self, rng: &mut SeededRng) {
        let word = rng.next_int(0, PALETTE.len() as i64 - 1) as usize;

        let ink = if rng.chance(Self::congruent_probability(self.level)) {
            word
        } else {
            // Uniform over the other five colors.
            let mut idx = rng.next_int(0, PALETTE.len() as i64 - 2) as usize;
            if idx >= word {
                idx += 1;
            }
            idx
        };

        let others: SmallVec<[usize; 6]> =
            (0..PALETTE.len()).filter(|&i| i != ink).collect();
        let mut options: Vec<usize> =
            rng.pick_multiple(&others, Self::option_count(self.level) - 1);
        options.push(ink);
        let options: SmallVec<[usize; 4]> = rng.shuffle(&options).into_iter().collect();

        self.challenge = Some(Challenge { word, ink, options });
    }

    fn time_limit(&self) -> u64 {
        let level = u64::from(self.level);
        let difficulty = u64::from(self.difficulty);
        5_000u64.saturating_sub(level * 200 + difficulty * 100).max(3_000)
    }

    fn advance(&mut self, mut response: InputResponse, rng: &mut SeededRng) -> InputResponse {
        self.answered += 1;
        if self.answered >= CHALLENGES_PER_LEVEL {
            self.challenge = None;
            response = response.clearing(batch_bonus(self.correct, CHALLENGES_PER_LEVEL));
        } else {
            self.next_challenge(rng);
        }
        response
    }
}

impl GameRules for StroopGame {
    fn game(&self) -> GameId {
        GameId::Stroop
    }

    fn generate_level(&mut self, ctx: &mut LevelContext<'_>) {
        self.level = ctx.level;
        self.difficulty = ctx.difficulty;
        self.answered = 0;
        self.correct = 0;
        self.next_challenge(ctx.rng);
    }

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut PlayContext<'_>) -> InputResponse {
        let InputEvent::Choice(option) = input else {
            return InputResponse::IGNORED;
        };
        let Some(challenge) = &self.challenge else {
            return InputResponse::IGNORED;
        };
        let Some(&picked) = challenge.options.get(*option) else {
            return InputResponse::IGNORED;
        };

        let verdict = if picked == challenge.ink {
            let time_bonus = (self.time_limit().saturating_sub(ctx.response_ms()) / 100) as u32;
            self.correct += 1;
            Verdict::Correct {
                points: BASE_POINTS + time_bonus,
            }
        } else {
            Verdict::Incorrect { costs_life: true }
        };

        self.advance(InputResponse::of(verdict), ctx.rng)
    }

    fn handle_timeout(&mut self, ctx: &mut PlayContext<'_>) -> InputResponse {
        if self.challenge.is_none() {
            return InputResponse::IGNORED;
        }
        self.advance(
            InputResponse::of(Verdict::Incorrect { costs_life: true }),
            ctx.rng,
        )
    }

    fn time_limit_ms(&self) -> Option<u64> {
        Some(self.time_limit())
    }

    fn progress(&self) -> Progress {
        Progress::Batch {
            completed: self.answered,
            total: CHALLENGES_PER_LEVEL,
        }
    }

    fn view(&self) -> GameView<'_> {
        GameView::Stroop(self.challenge.as_ref())
    }
}
