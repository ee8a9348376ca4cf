//! Difficulty curve and star ratings.
//!
//! Pure functions of their arguments. Nothing here caches "today" or reads
//! the clock; the scheduling layer decides which date to pass, which keeps
//! daily content identical for every player regardless of when the app
//! computed it.

use chrono::{Datelike, NaiveDate};

use super::config::{MAX_DIFFICULTY, MIN_DIFFICULTY};

/// Base difficulty used by the daily schedule.
pub const DEFAULT_BASE: u8 = 5;

/// Day-of-week scaling, Sunday through Saturday.
///
/// Weekends are easier, the week ramps up toward Friday.
const DAY_OF_WEEK_MODIFIERS: [f64; 7] = [0.7, 0.8, 0.9, 1.0, 1.1, 1.2, 0.6];

/// Difficulty scalar for a calendar date.
///
/// `base * day_of_week_modifier * month_progress_modifier`, rounded to the
/// nearest integer and clamped to `[1, 10]`. The month modifier ramps from
/// 0.8 at the start of a month to 1.2 at the end.
#[must_use]
pub fn calculate_difficulty(base: u8, date: NaiveDate) -> u8 {
    let dow = date.weekday().num_days_from_sunday() as usize;
    let month_progress = 0.8 + (f64::from(date.day()) / 30.0) * 0.4;
    let raw = f64::from(base) * DAY_OF_WEEK_MODIFIERS[dow] * month_progress;
    (raw.round() as i64).clamp(i64::from(MIN_DIFFICULTY), i64::from(MAX_DIFFICULTY)) as u8
}

/// Star rating for a finished session.
///
/// Thresholds on `score / max_possible`: 0.95 for five stars, then 0.80,
/// 0.60, 0.40. Anything below 0.40 (or an empty `max_possible`) is one star.
#[must_use]
pub fn calculate_stars(score: u32, max_possible: u32) -> u8 {
    if max_possible == 0 {
        return 1;
    }
    let ratio = f64::from(score) / f64::from(max_possible);
    match ratio {
        r if r >= 0.95 => 5,
        r if r >= 0.80 => 4,
        r if r >= 0.60 => 3,
        r if r >= 0.40 => 2,
        _ => 1,
    }
}
