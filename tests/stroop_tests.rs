//! Color/word conflict game integration tests.

use brainplay::games::PALETTE;
use brainplay::{
    CollectingObserver, GameConfig, GameId, GameSession, GameStatus, GameView, InputEvent,
};

fn session_at_level(seed: u32, level: u32) -> GameSession {
    let mut session = GameSession::new(
        GameConfig::new(GameId::Stroop)
            .with_seed(seed)
            .with_start_level(level),
    )
    .unwrap();
    session.init();
    session.start(0);
    session
}

/// Index of the correct option in the current challenge.
fn ink_position(session: &GameSession) -> usize {
    match session.view() {
        GameView::Stroop(Some(c)) => c.options.iter().position(|&o| o == c.ink).unwrap(),
        other => panic!("expected a challenge, got {other:?}"),
    }
}

/// Index of some wrong option in the current challenge.
fn miss_position(session: &GameSession) -> usize {
    match session.view() {
        GameView::Stroop(Some(c)) => c.options.iter().position(|&o| o != c.ink).unwrap(),
        other => panic!("expected a challenge, got {other:?}"),
    }
}

// =============================================================================
// Challenge Generation
// =============================================================================

/// Early levels offer two options, late levels four; the ink is always among
/// them exactly once and every index points into the palette.
#[test]
fn test_option_growth_and_palette_bounds() {
    for (level, expected) in [(1, 2), (4, 3), (7, 4), (10, 4)] {
        let session = session_at_level(50 + level, level);
        let GameView::Stroop(Some(challenge)) = session.view() else {
            panic!("no challenge at level {level}");
        };

        assert_eq!(challenge.options.len(), expected, "level {level}");
        let ink_hits = challenge
            .options
            .iter()
            .filter(|&&o| o == challenge.ink)
            .count();
        assert_eq!(ink_hits, 1);
        assert!(challenge.options.iter().all(|&o| o < PALETTE.len()));
        assert!(challenge.word < PALETTE.len());
    }
}

// =============================================================================
// Scoring
// =============================================================================

/// An instant correct tap earns the base points plus the full time bonus.
#[test]
fn test_correct_tap_scores() {
    let mut session = session_at_level(42, 1);

    let tap = ink_position(&session);
    session.handle_input(&InputEvent::Choice(tap), 0);

    // Level 1, difficulty 5: limit 4300, bonus 43.
    assert_eq!(session.state().score, 20 + 43);
    assert_eq!(session.state().lives, 3);
}

/// Tapping the word's color instead of the ink is the classic mistake and
/// costs a life.
#[test]
fn test_wrong_tap_costs_life() {
    let mut session = session_at_level(42, 1);

    let tap = miss_position(&session);
    session.handle_input(&InputEvent::Choice(tap), 500);

    assert_eq!(session.state().score, 0);
    assert_eq!(session.state().lives, 2);
    assert_eq!(session.state().status, GameStatus::Playing);
}

/// Out-of-range option indices change nothing and notify nobody.
#[test]
fn test_invalid_option_ignored() {
    let observer = CollectingObserver::new();
    let mut session = session_at_level(42, 1);
    session.set_observer(Box::new(observer.clone()));

    session.handle_input(&InputEvent::Choice(17), 100);

    assert_eq!(observer.state_changes(), 0);
    assert_eq!(session.state().score, 0);
    assert_eq!(session.state().lives, 3);
}

/// A timeout is a mistake with normal batch progression.
#[test]
fn test_timeout_advances_batch() {
    let mut session = session_at_level(42, 1);

    let before = match session.view() {
        GameView::Stroop(Some(c)) => c.clone(),
        _ => unreachable!(),
    };
    session.handle_timeout(10_000);

    assert_eq!(session.state().lives, 2);
    let after = match session.view() {
        GameView::Stroop(Some(c)) => c.clone(),
        _ => unreachable!(),
    };
    assert_ne!(before, after, "timeout must present the next challenge");
}

// =============================================================================
// Level Progression
// =============================================================================

/// Five correct taps clear the level with the full bonus, added once.
#[test]
fn test_batch_clear_advances_level() {
    let observer = CollectingObserver::new();
    let mut session = session_at_level(42, 1);
    session.set_observer(Box::new(observer.clone()));

    for _ in 0..5 {
        let tap = ink_position(&session);
        session.handle_input(&InputEvent::Choice(tap), 0);
    }

    // Five tap notifications, then one level-up notification.
    let states = observer.states();
    assert_eq!(states.len(), 6);
    let fifth_tap = &states[4];
    let level_up = &states[5];
    assert_eq!(level_up.level, 2);
    // Five instant taps at (20 + 43) each, plus the 50-point batch bonus
    // landing exactly once.
    assert_eq!(fifth_tap.score, 5 * 63);
    assert_eq!(level_up.score, 5 * 63 + 50);
}

/// Playing every level to the end completes the session with full accuracy.
#[test]
fn test_full_run_to_completion() {
    let observer = CollectingObserver::new();
    let mut session = session_at_level(7, 1);
    session.set_observer(Box::new(observer.clone()));

    let mut now = 0;
    let mut guard = 0;
    while session.state().status == GameStatus::Playing {
        now += 400;
        let tap = ink_position(&session);
        session.handle_input(&InputEvent::Choice(tap), now);
        guard += 1;
        assert!(guard <= 50, "10 levels of 5 challenges is 50 taps");
    }

    assert_eq!(session.state().status, GameStatus::Completed);
    let result = observer.result().unwrap();
    assert_eq!(result.levels_completed, 10);
    assert!((result.accuracy - 1.0).abs() < f64::EPSILON);
    assert_eq!(observer.results().len(), 1);
}
