//! Face-down pair matching.
//!
//! The board grows with level from 2×2 up to 6×6. Flipping the second card
//! of an attempt does not resolve immediately: the pair stays visible for a
//! fixed delay so the player can see both faces, then either locks as
//! matched or flips back. That delay is the engine's only deferred work; it
//! is held as data and driven by the session's `poll`, so dropping the
//! session cancels it outright.

use serde::{Deserialize, Serialize};

use crate::core::{GameId, SeededRng};

use super::{
    GameRules, GameView, InputEvent, InputResponse, LevelContext, PlayContext, Progress, Verdict,
};

/// How long a non-matching pair stays visible, in milliseconds.
pub const RESOLVE_DELAY_MS: u64 = 800;

/// Base points for a match.
const MATCH_POINTS: u32 = 25;

/// Distinct symbols available to the renderer. The top board tiers need
/// more pairs than this, so symbols repeat there.
pub const SYMBOL_COUNT: u32 = 16;

/// Board dimensions per level: (rows, columns).
const LEVEL_TABLE: [(u32, u32); 8] = [
    (2, 2),
    (2, 4),
    (3, 4),
    (4, 4),
    (4, 5),
    (4, 6),
    (5, 6),
    (6, 6),
];

/// One card on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Symbol id in `0..SYMBOL_COUNT`; two cards share each symbol.
    pub symbol: u8,
    /// Currently visible.
    pub face_up: bool,
    /// Locked as part of a found pair.
    pub matched: bool,
}

/// The current board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub rows: u32,
    pub cols: u32,
    /// Row-major cards.
    pub cards: Vec<Card>,
}

/// A second card was flipped; resolution is due at `resolve_at_ms`.
#[derive(Clone, Copy, Debug)]
struct PendingFlip {
    first: usize,
    second: usize,
    resolve_at_ms: u64,
}

/// Rules implementor for the pair-matching game.
#[derive(Clone, Debug, Default)]
pub struct MemoryPairsGame {
    board: Option<Board>,
    first_up: Option<usize>,
    pending: Option<PendingFlip>,
    moves: u32,
    matched_pairs: u32,
    total_pairs: u32,
}

impl MemoryPairsGame {
    /// Create the variant. Content appears on the first `generate_level`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Board dimensions for a level.
    #[must_use]
    pub fn dimensions(level: u32) -> (u32, u32) {
        let idx = (level.clamp(1, LEVEL_TABLE.len() as u32) - 1) as usize;
        LEVEL_TABLE[idx]
    }

    fn resolve(&mut self, flip: PendingFlip) -> InputResponse {
        let board = self.board.as_mut().expect("pending flip without a board");
        let matched = board.cards[flip.first].symbol == board.cards[flip.second].symbol;

        if matched {
            board.cards[flip.first].matched = true;
            board.cards[flip.second].matched = true;
            self.matched_pairs += 1;

            let efficiency_bonus = 20u32.saturating_sub(self.moves) * 2;
            let response = InputResponse::of(Verdict::Correct {
                points: MATCH_POINTS + efficiency_bonus,
            });
            if self.matched_pairs == self.total_pairs {
                // moves >= total_pairs > 0 here, the division is safe.
                response.clearing(self.total_pairs * 100 / self.moves)
            } else {
                response
            }
        } else {
            board.cards[flip.first].face_up = false;
            board.cards[flip.second].face_up = false;
            InputResponse::of(Verdict::Incorrect { costs_life: false })
        }
    }
}

impl GameRules for MemoryPairsGame {
    fn game(&self) -> GameId {
        GameId::MemoryPairs
    }

    fn generate_level(&mut self, ctx: &mut LevelContext<'_>) {
        let (rows, cols) = Self::dimensions(ctx.level);
        let total_pairs = rows * cols / 2;

        let mut symbols: Vec<u8> = Vec::with_capacity((total_pairs * 2) as usize);
        for i in 0..total_pairs {
            let symbol = (i % SYMBOL_COUNT) as u8;
            symbols.push(symbol);
            symbols.push(symbol);
        }
        let cards = ctx
            .rng
            .shuffle(&symbols)
            .into_iter()
            .map(|symbol| Card {
                symbol,
                face_up: false,
                matched: false,
            })
            .collect();

        self.board = Some(Board { rows, cols, cards });
        self.first_up = None;
        self.pending = None;
        self.moves = 0;
        self.matched_pairs = 0;
        self.total_pairs = total_pairs;
    }

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut PlayContext<'_>) -> InputResponse {
        let InputEvent::Card(index) = *input else {
            return InputResponse::IGNORED;
        };
        // Two cards already await resolution.
        if self.pending.is_some() {
            return InputResponse::IGNORED;
        }
        let Some(board) = self.board.as_mut() else {
            return InputResponse::IGNORED;
        };
        let Some(card) = board.cards.get_mut(index) else {
            return InputResponse::IGNORED;
        };
        if card.face_up || card.matched {
            return InputResponse::IGNORED;
        }

        card.face_up = true;
        match self.first_up.take() {
            None => {
                self.first_up = Some(index);
            }
            Some(first) => {
                self.moves += 1;
                self.pending = Some(PendingFlip {
                    first,
                    second: index,
                    resolve_at_ms: ctx.now_ms + RESOLVE_DELAY_MS,
                });
            }
        }
        InputResponse::of(Verdict::Pending)
    }

    fn handle_timeout(&mut self, _ctx: &mut PlayContext<'_>) -> InputResponse {
        if self.board.is_none() {
            return InputResponse::IGNORED;
        }
        InputResponse::of(Verdict::Incorrect { costs_life: true })
    }

    fn poll(&mut self, ctx: &mut PlayContext<'_>) -> Option<InputResponse> {
        let flip = self.pending?;
        if ctx.now_ms < flip.resolve_at_ms {
            return None;
        }
        self.pending = None;
        Some(self.resolve(flip))
    }

    fn cancel_pending(&mut self) {
        self.pending = None;
    }

    fn time_limit_ms(&self) -> Option<u64> {
        None
    }

    fn progress(&self) -> Progress {
        Progress::Pairs {
            matched: self.matched_pairs,
            total: self.total_pairs,
            moves: self.moves,
        }
    }

    fn view(&self) -> GameView<'_> {
        GameView::MemoryPairs(self.board.as_ref())
    }
}
