//! The session state machine shared by every game variant.
//!
//! ## Lifecycle
//!
//! `Idle → Ready` (`init`), `Ready → Playing` (`start`), then `Playing`
//! loops through levels until either the final level is cleared
//! (`Completed`) or lives run out (`GameOver`). Terminal states accept no
//! further input; constructing a new session is the only way to play again.
//!
//! ## Time
//!
//! The caller owns every clock. Time-sensitive operations take `now_ms`
//! (milliseconds since the Unix epoch); countdown display and timeout
//! detection poll [`GameSession::time_remaining_ms`] and call
//! [`GameSession::handle_timeout`] when they decide time is up. The one
//! piece of deferred work (the memory game's pair resolution) is driven by
//! [`GameSession::poll`] and dies with the session.
//!
//! ## Example
//!
//! ```
//! use brainplay::{GameConfig, GameId, GameSession, GameView, InputEvent};
//!
//! let config = GameConfig::new(GameId::Arithmetic).with_seed(42);
//! let mut session = GameSession::new(config).unwrap();
//!
//! session.init();
//! session.start(1_000);
//!
//! let answer = match session.view() {
//!     GameView::Arithmetic(Some(problem)) => problem.answer(),
//!     _ => unreachable!(),
//! };
//! session.handle_input(&InputEvent::Answer(answer), 2_500);
//! assert!(session.state().score > 0);
//! ```

mod observer;

pub use observer::{CollectingObserver, GameObserver};

use chrono::DateTime;
use tracing::{debug, trace};

use crate::core::{
    Category, EngineError, GameConfig, GameResult, GameState, GameStatus, SeededRng,
};
use crate::games::{
    GameRegistry, GameRules, GameView, InputEvent, InputResponse, LevelContext, PlayContext,
    Progress, Verdict,
};

/// One play session of one game.
///
/// Owns its state, its RNG stream, and the boxed rules variant; nothing is
/// shared between sessions. Dropping the session is complete teardown.
pub struct GameSession {
    config: GameConfig,
    category: Category,
    state: GameState,
    rng: SeededRng,
    difficulty: u8,
    rules: Box<dyn GameRules>,
    observer: Option<Box<dyn GameObserver>>,
    judged_correct: u32,
    judged_incorrect: u32,
    level_started_ms: u64,
    challenge_started_ms: u64,
    result: Option<GameResult>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("category", &self.category)
            .field("state", &self.state)
            .field("rng", &self.rng)
            .field("difficulty", &self.difficulty)
            .field("rules", &format_args!("<dyn GameRules>"))
            .field(
                "observer",
                &format_args!(
                    "{}",
                    if self.observer.is_some() {
                        "Some(<dyn GameObserver>)"
                    } else {
                        "None"
                    }
                ),
            )
            .field("judged_correct", &self.judged_correct)
            .field("judged_incorrect", &self.judged_incorrect)
            .field("level_started_ms", &self.level_started_ms)
            .field("challenge_started_ms", &self.challenge_started_ms)
            .field("result", &self.result)
            .finish()
    }
}

impl GameSession {
    /// Build a session from the standard catalog.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        Self::with_registry(&GameRegistry::standard(), config)
    }

    /// Build a session against an explicit registry.
    ///
    /// Fails fast on an invalid config (out-of-range difficulty, an
    /// unregistered game, a start level beyond the game's range) before any
    /// state exists.
    pub fn with_registry(registry: &GameRegistry, config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let entry = registry
            .get(config.game)
            .ok_or_else(|| EngineError::UnknownGame(config.game.as_str().to_string()))?;

        let start_level = config.start_level.unwrap_or(1);
        if !(1..=entry.max_level).contains(&start_level) {
            return Err(EngineError::LevelOutOfRange {
                game: config.game,
                level: start_level,
                max: entry.max_level,
            });
        }

        let rng = match config.seed {
            Some(seed) => SeededRng::new(seed),
            None => SeededRng::from_entropy(),
        };

        Ok(Self {
            category: entry.category,
            state: GameState::new(start_level, entry.max_level, entry.max_lives),
            rng,
            difficulty: config.difficulty_or_default(),
            rules: entry.create(),
            observer: None,
            judged_correct: 0,
            judged_incorrect: 0,
            level_started_ms: 0,
            challenge_started_ms: 0,
            result: None,
            config,
        })
    }

    /// Register the notification sink.
    pub fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = Some(observer);
    }

    /// `Idle → Ready`. No-op from any other status.
    ///
    /// Performs no setup with side effects: no timers, no RNG consumption,
    /// so two sessions initialized at different times stay identical.
    pub fn init(&mut self) {
        if self.state.status != GameStatus::Idle {
            return;
        }
        self.state.status = GameStatus::Ready;
        debug!(game = %self.config.game, "session ready");
        self.notify_state();
    }

    /// `Ready → Playing`. Records the start time and generates the first
    /// level. No-op unless the session is `Ready`.
    pub fn start(&mut self, now_ms: u64) {
        if self.state.status != GameStatus::Ready {
            return;
        }
        self.state.status = GameStatus::Playing;
        self.state.started_at = Some(now_ms);
        self.level_started_ms = now_ms;
        self.challenge_started_ms = now_ms;
        self.generate_level();
        debug!(game = %self.config.game, level = self.state.level, "session started");
        self.notify_state();
    }

    /// Forward a player action.
    ///
    /// Silently ignored outside `Playing` or when the variant judges the
    /// event structurally invalid; neither case mutates state or notifies.
    pub fn handle_input(&mut self, input: &InputEvent, now_ms: u64) {
        if self.state.status != GameStatus::Playing {
            return;
        }
        let mut ctx = PlayContext {
            rng: &mut self.rng,
            level: self.state.level,
            difficulty: self.difficulty,
            now_ms,
            challenge_started_ms: self.challenge_started_ms,
            level_started_ms: self.level_started_ms,
        };
        let response = self.rules.handle_input(input, &mut ctx);
        self.apply(response, now_ms);
    }

    /// Caller-detected timeout: judged like a wrong answer, with the same
    /// batch progression.
    pub fn handle_timeout(&mut self, now_ms: u64) {
        if self.state.status != GameStatus::Playing {
            return;
        }
        let mut ctx = PlayContext {
            rng: &mut self.rng,
            level: self.state.level,
            difficulty: self.difficulty,
            now_ms,
            challenge_started_ms: self.challenge_started_ms,
            level_started_ms: self.level_started_ms,
        };
        let response = self.rules.handle_timeout(&mut ctx);
        self.apply(response, now_ms);
    }

    /// Resolve deferred work that has come due (memory pair resolution).
    ///
    /// Safe to call every frame; a no-op for variants without deferred work.
    pub fn poll(&mut self, now_ms: u64) {
        if self.state.status != GameStatus::Playing {
            return;
        }
        let mut ctx = PlayContext {
            rng: &mut self.rng,
            level: self.state.level,
            difficulty: self.difficulty,
            now_ms,
            challenge_started_ms: self.challenge_started_ms,
            level_started_ms: self.level_started_ms,
        };
        if let Some(response) = self.rules.poll(&mut ctx) {
            self.apply(response, now_ms);
        }
    }

    /// Cancel deferred work. Called automatically at terminal transitions;
    /// callers abandoning a session early should call it too.
    pub fn cleanup(&mut self) {
        self.rules.cancel_pending();
    }

    // === Read access ===

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The config this session was built from.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Effective difficulty scalar.
    #[must_use]
    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    /// Renderable payload of the current challenge.
    #[must_use]
    pub fn view(&self) -> GameView<'_> {
        self.rules.view()
    }

    /// Within-level progress.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.rules.progress()
    }

    /// The terminal result, once the session has ended.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Time left on the current challenge, computed on demand.
    ///
    /// `None` while not playing or when the variant has no per-challenge
    /// clock. The engine never enforces this limit itself; the caller calls
    /// [`GameSession::handle_timeout`] when it reads zero.
    #[must_use]
    pub fn time_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        if self.state.status != GameStatus::Playing {
            return None;
        }
        self.rules
            .time_limit_ms()
            .map(|limit| limit.saturating_sub(now_ms.saturating_sub(self.challenge_started_ms)))
    }

    // === State machine internals ===

    fn generate_level(&mut self) {
        let mut ctx = LevelContext {
            rng: &mut self.rng,
            level: self.state.level,
            difficulty: self.difficulty,
        };
        self.rules.generate_level(&mut ctx);
    }

    fn apply(&mut self, response: InputResponse, now_ms: u64) {
        match response.verdict {
            Verdict::Ignored => return,
            Verdict::Pending => {
                self.notify_state();
            }
            Verdict::Correct { points } => {
                self.judged_correct += 1;
                self.state.score += points;
                trace!(points, score = self.state.score, "correct");
                self.notify_state();
            }
            Verdict::Incorrect { costs_life } => {
                self.judged_incorrect += 1;
                if costs_life {
                    self.state.lives = self.state.lives.saturating_sub(1);
                    trace!(lives = self.state.lives, "mistake");
                    if self.state.lives == 0 {
                        // Lives exhausted wins over a simultaneous level clear.
                        self.finish(GameStatus::GameOver, now_ms);
                        return;
                    }
                }
                self.notify_state();
            }
        }

        if let Some(bonus) = response.level_cleared {
            self.level_complete(bonus, now_ms);
        } else if !matches!(response.verdict, Verdict::Pending) {
            // The variant moved on to the next challenge in the batch.
            self.challenge_started_ms = now_ms;
        }
    }

    fn level_complete(&mut self, bonus: u32, now_ms: u64) {
        self.state.score += bonus;
        if self.state.level >= self.state.max_level {
            self.finish(GameStatus::Completed, now_ms);
            return;
        }
        self.state.level += 1;
        self.level_started_ms = now_ms;
        self.challenge_started_ms = now_ms;
        self.generate_level();
        debug!(level = self.state.level, score = self.state.score, "level up");
        self.notify_state();
    }

    fn finish(&mut self, status: GameStatus, now_ms: u64) {
        self.state.status = status;
        self.rules.cancel_pending();

        let levels_completed = match status {
            GameStatus::Completed => self.state.max_level,
            _ => self.state.level.saturating_sub(1),
        };
        let judged = self.judged_correct + self.judged_incorrect;
        let accuracy = if judged == 0 {
            0.0
        } else {
            f64::from(self.judged_correct) / f64::from(judged)
        };
        let result = GameResult {
            game: self.config.game,
            category: self.category,
            score: self.state.score,
            accuracy,
            levels_completed,
            max_level: self.state.max_level,
            duration_ms: now_ms.saturating_sub(self.state.started_at.unwrap_or(now_ms)),
            date: DateTime::from_timestamp_millis(now_ms as i64)
                .map(|dt| dt.date_naive())
                .unwrap_or_default(),
        };

        debug!(
            game = %self.config.game,
            status = ?self.state.status,
            score = result.score,
            "session finished"
        );
        self.notify_state();
        if let Some(observer) = self.observer.as_mut() {
            observer.on_complete(&result);
        }
        self.result = Some(result);
    }

    fn notify_state(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_state_change(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameId;

    fn arithmetic_session() -> GameSession {
        GameSession::new(GameConfig::new(GameId::Arithmetic).with_seed(42)).unwrap()
    }

    #[test]
    fn test_lifecycle_gates() {
        let mut session = arithmetic_session();
        assert_eq!(session.state().status, GameStatus::Idle);

        // start before init is a no-op.
        session.start(0);
        assert_eq!(session.state().status, GameStatus::Idle);

        session.init();
        assert_eq!(session.state().status, GameStatus::Ready);

        // init twice is a no-op.
        session.init();
        assert_eq!(session.state().status, GameStatus::Ready);

        session.start(1_000);
        assert_eq!(session.state().status, GameStatus::Playing);
        assert_eq!(session.state().started_at, Some(1_000));
    }

    #[test]
    fn test_input_before_start_ignored() {
        let mut session = arithmetic_session();
        session.handle_input(&InputEvent::Answer(4), 0);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().status, GameStatus::Idle);
    }

    #[test]
    fn test_construction_rejects_bad_difficulty() {
        let config = GameConfig::new(GameId::Arithmetic).with_difficulty(11);
        assert_eq!(
            GameSession::new(config).unwrap_err(),
            EngineError::DifficultyOutOfRange(11)
        );
    }

    #[test]
    fn test_construction_rejects_bad_start_level() {
        let config = GameConfig::new(GameId::MemoryPairs).with_start_level(9);
        assert_eq!(
            GameSession::new(config).unwrap_err(),
            EngineError::LevelOutOfRange {
                game: GameId::MemoryPairs,
                level: 9,
                max: 8,
            }
        );
    }

    #[test]
    fn test_construction_rejects_unregistered_game() {
        let registry = GameRegistry::new();
        let err = GameSession::with_registry(&registry, GameConfig::new(GameId::Stroop));
        assert_eq!(
            err.unwrap_err(),
            EngineError::UnknownGame("stroop".to_string())
        );
    }

    #[test]
    fn test_time_remaining_is_pure() {
        let mut session = arithmetic_session();
        session.init();
        session.start(10_000);

        // Level 1, difficulty 5: limit 13000.
        assert_eq!(session.time_remaining_ms(10_000), Some(13_000));
        assert_eq!(session.time_remaining_ms(15_000), Some(8_000));
        assert_eq!(session.time_remaining_ms(30_000), Some(0));
        // Reading it twice changes nothing.
        assert_eq!(session.time_remaining_ms(15_000), Some(8_000));
    }

    #[test]
    fn test_timeout_costs_a_life() {
        let mut session = arithmetic_session();
        session.init();
        session.start(0);

        session.handle_timeout(14_000);
        assert_eq!(session.state().lives, 2);
        assert_eq!(session.state().status, GameStatus::Playing);
    }

    #[test]
    fn test_lives_never_negative_and_complete_fires_once() {
        let observer = CollectingObserver::new();
        let mut session = arithmetic_session();
        session.set_observer(Box::new(observer.clone()));
        session.init();
        session.start(0);

        for i in 0..10 {
            session.handle_timeout(1_000 * (i + 1));
        }

        let state = observer.last_state().unwrap();
        assert_eq!(state.lives, 0);
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(observer.results().len(), 1, "on_complete must fire exactly once");
        assert!(session.result().is_some());
    }

    #[test]
    fn test_result_fields_on_game_over() {
        let observer = CollectingObserver::new();
        let mut session = arithmetic_session();
        session.set_observer(Box::new(observer.clone()));
        session.init();
        session.start(1_000);

        session.handle_timeout(2_000);
        session.handle_timeout(3_000);
        session.handle_timeout(4_000);

        let result = observer.result().unwrap();
        assert_eq!(result.game, GameId::Arithmetic);
        assert_eq!(result.category, Category::Math);
        assert_eq!(result.levels_completed, 0);
        assert_eq!(result.max_level, 10);
        assert_eq!(result.duration_ms, 3_000);
        assert!((result.accuracy - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_terminal_session_ignores_everything() {
        let observer = CollectingObserver::new();
        let mut session = arithmetic_session();
        session.set_observer(Box::new(observer.clone()));
        session.init();
        session.start(0);
        for i in 0..3 {
            session.handle_timeout(1_000 * (i + 1));
        }
        assert_eq!(session.state().status, GameStatus::GameOver);

        let notifications = observer.state_changes();
        session.handle_input(&InputEvent::Answer(1), 5_000);
        session.handle_timeout(6_000);
        session.poll(7_000);
        session.start(8_000);

        assert_eq!(observer.state_changes(), notifications);
        assert_eq!(observer.results().len(), 1);
    }
}
