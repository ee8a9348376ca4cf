//! Core building blocks: RNG, difficulty curve, configuration, state,
//! results, errors.

pub mod config;
pub mod difficulty;
pub mod error;
pub mod result;
pub mod rng;
pub mod state;

pub use config::{
    Category, GameConfig, GameId, DEFAULT_DIFFICULTY, MAX_DIFFICULTY, MIN_DIFFICULTY,
};
pub use difficulty::{calculate_difficulty, calculate_stars, DEFAULT_BASE};
pub use error::EngineError;
pub use result::GameResult;
pub use rng::{daily_seed, game_seed, SeededRng};
pub use state::{GameState, GameStatus};
