//! Outbound notification seam.
//!
//! The session does not hold closures into the surrounding app; it holds one
//! boxed observer. The app implements [`GameObserver`] on whatever owns its
//! rendering and stats plumbing.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{GameResult, GameState};

/// Listener for session notifications.
///
/// `on_state_change` fires after every mutating operation; `on_complete`
/// fires exactly once per session, at the terminal transition. Both default
/// to no-ops so implementors can subscribe to either side alone.
pub trait GameObserver {
    /// State changed: score, lives, level, or status.
    fn on_state_change(&mut self, _state: &GameState) {}

    /// The session reached `GameOver` or `Completed`.
    fn on_complete(&mut self, _result: &GameResult) {}
}

#[derive(Debug, Default)]
struct Recorded {
    states: Vec<GameState>,
    results: Vec<GameResult>,
}

/// Observer that records every notification.
///
/// Cloning shares the underlying record, so a caller can keep one handle and
/// hand the other to the session:
///
/// ```
/// use brainplay::{CollectingObserver, GameConfig, GameId, GameSession};
///
/// let observer = CollectingObserver::new();
/// let mut session = GameSession::new(GameConfig::new(GameId::Arithmetic).with_seed(1)).unwrap();
/// session.set_observer(Box::new(observer.clone()));
///
/// session.init();
/// assert_eq!(observer.state_changes(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CollectingObserver {
    inner: Rc<RefCell<Recorded>>,
}

impl CollectingObserver {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of state-change notifications seen.
    #[must_use]
    pub fn state_changes(&self) -> usize {
        self.inner.borrow().states.len()
    }

    /// Snapshot of every state notification, in order.
    #[must_use]
    pub fn states(&self) -> Vec<GameState> {
        self.inner.borrow().states.clone()
    }

    /// The most recent state notification.
    #[must_use]
    pub fn last_state(&self) -> Option<GameState> {
        self.inner.borrow().states.last().cloned()
    }

    /// Every completion notification. More than one entry is a bug.
    #[must_use]
    pub fn results(&self) -> Vec<GameResult> {
        self.inner.borrow().results.clone()
    }

    /// The completion notification, if the session ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.inner.borrow().results.last().cloned()
    }
}

impl GameObserver for CollectingObserver {
    fn on_state_change(&mut self, state: &GameState) {
        self.inner.borrow_mut().states.push(state.clone());
    }

    fn on_complete(&mut self, result: &GameResult) {
        self.inner.borrow_mut().results.push(result.clone());
    }
}
