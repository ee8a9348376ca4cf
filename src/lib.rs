//! # brainplay
//!
//! Deterministic engine core for a catalog of short casual brain-training
//! mini-games. The surrounding app (rendering, ads, persistence, sharing)
//! is glue around this crate: it constructs a session, forwards input, and
//! renders whatever the session reports.
//!
//! ## Design Principles
//!
//! 1. **Deterministic content**: Every piece of generated content is a pure
//!    function of a 31-bit seed. Seeds derived from the calendar date give
//!    every player the same daily challenge.
//!
//! 2. **Caller drives time**: Engines take timestamps as parameters and
//!    compute "time remaining" on demand. No internal timers, no clock
//!    reads; a scripted session replays exactly.
//!
//! 3. **Composition over inheritance**: One [`games::GameRules`] implementor
//!    per game, selected through a registry keyed by [`GameId`]. The session
//!    state machine owns lives, score, levels, and notifications.
//!
//! ## Modules
//!
//! - `core`: RNG and daily seeds, difficulty curve, configuration, state,
//!   results, errors
//! - `session`: the shared state machine and observer seam
//! - `games`: the rules contract, registry, and the four shipped variants
//!
//! ## Quick Start
//!
//! ```
//! use brainplay::{game_seed, GameConfig, GameId, GameSession, GameView, InputEvent};
//! use chrono::Utc;
//!
//! // Daily-challenge seed: identical for every player today.
//! let seed = game_seed(GameId::Stroop, Utc::now());
//!
//! let mut session = GameSession::new(GameConfig::new(GameId::Stroop).with_seed(seed)).unwrap();
//! session.init();
//! session.start(0);
//!
//! if let GameView::Stroop(Some(challenge)) = session.view() {
//!     let tap = challenge.options.iter().position(|&o| o == challenge.ink).unwrap();
//!     session.handle_input(&InputEvent::Choice(tap), 900);
//! }
//! ```

pub mod core;
pub mod games;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    calculate_difficulty, calculate_stars, daily_seed, game_seed, Category, EngineError,
    GameConfig, GameId, GameResult, GameState, GameStatus, SeededRng, DEFAULT_BASE,
    DEFAULT_DIFFICULTY, MAX_DIFFICULTY, MIN_DIFFICULTY,
};

pub use crate::session::{CollectingObserver, GameObserver, GameSession};

pub use crate::games::{
    GameEntry, GameRegistry, GameRules, GameView, InputEvent, InputResponse, LevelContext,
    PlayContext, Progress, Verdict,
};
