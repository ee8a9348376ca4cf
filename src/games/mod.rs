//! Game variants and the contract they implement.
//!
//! The session state machine is generic over [`GameRules`]: one implementor
//! per game, chosen through the [`registry::GameRegistry`] keyed by
//! [`GameId`]. A variant owns only its per-level content (current problem,
//! board, sequence); lives, score, level progression and notifications stay
//! in the session.
//!
//! Variants communicate results as data. `handle_input` returns an
//! [`InputResponse`] and the session applies it: scoring, life loss, level
//! advance, observer notifications. Nothing in this module calls back into
//! the session.

pub mod arithmetic;
pub mod memory_pairs;
pub mod registry;
pub mod sequence_recall;
pub mod stroop;

use crate::core::{GameId, SeededRng};

pub use arithmetic::{ArithmeticGame, Operator, Problem};
pub use memory_pairs::{Board, Card, MemoryPairsGame, RESOLVE_DELAY_MS};
pub use registry::{GameEntry, GameRegistry};
pub use sequence_recall::{Recall, SequenceRecallGame};
pub use stroop::{Challenge, PaletteColor, StroopGame, PALETTE};

/// Context for level generation.
///
/// Deliberately carries no clock: generated content must be a pure function
/// of the stream, the level, and the difficulty scalar.
pub struct LevelContext<'a> {
    /// The session's stream. The only randomness a variant may consume.
    pub rng: &'a mut SeededRng,
    /// Level being generated, `1..=max_level`.
    pub level: u32,
    /// Difficulty scalar in `[1, 10]`.
    pub difficulty: u8,
}

/// Context for input handling and pending-work polling.
///
/// All timestamps are caller-supplied milliseconds since the Unix epoch; the
/// engine never reads a clock of its own.
pub struct PlayContext<'a> {
    /// The session's stream, for generating the next challenge in a batch.
    pub rng: &'a mut SeededRng,
    /// Current level.
    pub level: u32,
    /// Difficulty scalar.
    pub difficulty: u8,
    /// Timestamp of the event being handled.
    pub now_ms: u64,
    /// When the current challenge was presented.
    pub challenge_started_ms: u64,
    /// When the current level started.
    pub level_started_ms: u64,
}

impl PlayContext<'_> {
    /// Milliseconds since the current challenge was presented.
    #[must_use]
    pub fn response_ms(&self) -> u64 {
        self.now_ms.saturating_sub(self.challenge_started_ms)
    }

    /// Whole seconds since the current level started.
    #[must_use]
    pub fn level_elapsed_secs(&self) -> u64 {
        self.now_ms.saturating_sub(self.level_started_ms) / 1000
    }
}

/// A player action forwarded into a session.
///
/// Each variant accepts one shape and ignores the rest, so a stale event
/// from a previous screen can never corrupt a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Numeric answer (arithmetic).
    Answer(i64),
    /// Index into the offered answer options (stroop).
    Choice(usize),
    /// Card index on the board (memory pairs).
    Card(usize),
    /// Tile index on the grid (sequence recall).
    Tile(usize),
}

/// How a variant judged one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Scored. The session adds the points and notifies.
    Correct {
        /// Points earned, time and operator bonuses included.
        points: u32,
    },
    /// Judged wrong. Counts against accuracy; may cost a life.
    Incorrect {
        /// Whether the session deducts a life.
        costs_life: bool,
    },
    /// State advanced without judgement (e.g. first card of a pair).
    Pending,
    /// Structurally invalid or out-of-turn. No mutation, no notification.
    Ignored,
}

/// Verdict plus an optional level-completion bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputResponse {
    /// Judgement for this event.
    pub verdict: Verdict,
    /// `Some(bonus)` when this event finished the level's batch.
    pub level_cleared: Option<u32>,
}

impl InputResponse {
    /// An event that should be dropped silently.
    pub const IGNORED: InputResponse = InputResponse {
        verdict: Verdict::Ignored,
        level_cleared: None,
    };

    /// Judgement without level completion.
    #[must_use]
    pub const fn of(verdict: Verdict) -> Self {
        Self {
            verdict,
            level_cleared: None,
        }
    }

    /// Attach a level-completion bonus.
    #[must_use]
    pub const fn clearing(mut self, bonus: u32) -> Self {
        self.level_cleared = Some(bonus);
        self
    }
}

/// Within-level progress for the progress bar / HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Fixed-size challenge batch (arithmetic, stroop).
    Batch { completed: u32, total: u32 },
    /// Pair matching.
    Pairs { matched: u32, total: u32, moves: u32 },
    /// Sequence entry.
    Sequence { entered: u32, length: u32 },
}

/// Borrowed, renderable payload of the current challenge.
///
/// The rendering layer matches on this instead of downcasting the boxed
/// variant. `None` payloads occur before the first level is generated.
#[derive(Debug)]
pub enum GameView<'a> {
    /// The current arithmetic problem.
    Arithmetic(Option<&'a Problem>),
    /// The current color/word challenge.
    Stroop(Option<&'a Challenge>),
    /// The full board.
    MemoryPairs(Option<&'a Board>),
    /// Grid, sequence, and entry progress.
    SequenceRecall(Option<&'a Recall>),
}

/// Contract implemented by each game variant.
///
/// ## Implementation notes
///
/// - `generate_level` must consume only `LevelContext`: no clocks, no
///   entropy of its own.
/// - `handle_input` and `handle_timeout` return what happened; they never
///   mutate lives or score themselves.
/// - `poll` exists for the one variant with deferred work (memory pair
///   resolution); everyone else keeps the default.
pub trait GameRules {
    /// Which game this implements.
    fn game(&self) -> GameId;

    /// Generate content for `ctx.level`, replacing the previous level.
    fn generate_level(&mut self, ctx: &mut LevelContext<'_>);

    /// Judge one input event.
    fn handle_input(&mut self, input: &InputEvent, ctx: &mut PlayContext<'_>) -> InputResponse;

    /// Caller-detected timeout; behaves like a wrong answer.
    fn handle_timeout(&mut self, ctx: &mut PlayContext<'_>) -> InputResponse;

    /// Resolve due deferred work, if any.
    fn poll(&mut self, _ctx: &mut PlayContext<'_>) -> Option<InputResponse> {
        None
    }

    /// Cancel deferred work so a disposed session stays inert.
    fn cancel_pending(&mut self) {}

    /// Per-challenge time limit, for the caller's countdown and timeout
    /// detection. `None` when the variant has no per-challenge clock.
    fn time_limit_ms(&self) -> Option<u64>;

    /// Within-level progress.
    fn progress(&self) -> Progress;

    /// Renderable payload of the current challenge.
    fn view(&self) -> GameView<'_>;
}

/// Bonus for clearing a batch of 5 challenges: `floor(correct / 5 * 50)`.
pub(crate) fn batch_bonus(correct: u32, batch_size: u32) -> u32 {
    correct * 50 / batch_size
}
