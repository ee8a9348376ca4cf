//! Deterministic random number generation and daily-seed derivation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Portable**: Pure 31-bit integer recurrence, identical on every
//!   platform and runtime the surrounding app ships to
//! - **Daily seeds**: Calendar-date derivation so every player sees the same
//!   daily challenge content
//!
//! ## Daily Challenge Usage
//!
//! ```
//! use brainplay::core::{game_seed, SeededRng};
//! use brainplay::GameId;
//! use chrono::Utc;
//!
//! let seed = game_seed(GameId::Arithmetic, Utc::now());
//! let mut rng = SeededRng::new(seed);
//!
//! // Every device constructing this rng today gets the same stream.
//! let roll = rng.next_int(1, 6);
//! assert!((1..=6).contains(&roll));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::GameId;

/// Modulus mask: the stream state occupies the low 31 bits.
const SEED_MASK: u32 = 0x7fff_ffff;

/// Deterministic linear congruential generator.
///
/// The recurrence `seed = (seed * 1103515245 + 12345) & 0x7fffffff` is fixed:
/// generated content must match across every device that derives the same
/// daily seed, so the stream is integer arithmetic only and never delegates
/// to a library generator whose internals could change under us.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRng {
    seed: u32,
}

impl SeededRng {
    /// Create a new generator from an explicit seed.
    ///
    /// Only the low 31 bits of the seed are used.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self {
            seed: seed & SEED_MASK,
        }
    }

    /// Create a generator seeded from OS entropy.
    ///
    /// Used for free-play sessions where reproducibility is not wanted.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u32>())
    }

    /// Current stream state.
    #[must_use]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Advance the stream and return a float in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.seed = ((u64::from(self.seed) * 1_103_515_245 + 12_345) & u64::from(SEED_MASK)) as u32;
        f64::from(self.seed) / f64::from(1u32 << 31)
    }

    /// Inclusive integer in `[min, max]`.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max, "next_int range is inverted: {min}..={max}");
        let span = (max - min + 1) as f64;
        min + (self.next() * span) as i64
    }

    /// Uniformly choose one element. `None` on an empty slice.
    #[must_use]
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_int(0, items.len() as i64 - 1) as usize;
        Some(&items[idx])
    }

    /// Choose `n` distinct elements without replacement.
    ///
    /// Clamps `n` to the slice length. Output order is unspecified.
    #[must_use]
    pub fn pick_multiple<T: Clone>(&mut self, items: &[T], n: usize) -> Vec<T> {
        let n = n.min(items.len());
        let mut pool: Vec<usize> = (0..items.len()).collect();
        let mut picked = Vec::with_capacity(n);
        for _ in 0..n {
            let idx = self.next_int(0, pool.len() as i64 - 1) as usize;
            picked.push(items[pool.swap_remove(idx)].clone());
        }
        picked
    }

    /// Fisher-Yates shuffle over a copy. The input is left untouched.
    #[must_use]
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        for i in (1..out.len()).rev() {
            let j = self.next_int(0, i as i64) as usize;
            out.swap(i, j);
        }
        out
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next() < p
    }
}

/// Stable 31-bit polynomial string hash.
///
/// Part of the daily-challenge contract: the same date string must hash the
/// same on every build, so this cannot be a std or crate hasher.
fn stable_hash(s: &str) -> u32 {
    let mut h: u32 = 0;
    for b in s.bytes() {
        h = h.wrapping_mul(31).wrapping_add(u32::from(b)) & SEED_MASK;
    }
    h
}

/// Seed for a calendar day.
///
/// Canonicalizes to the UTC calendar date before hashing; time of day is
/// ignored, so every call on the same UTC day yields the same seed.
#[must_use]
pub fn daily_seed(when: DateTime<Utc>) -> u32 {
    let day = when.date_naive().format("%Y-%m-%d").to_string();
    stable_hash(&day)
}

/// Seed for one game on a calendar day.
///
/// Combines [`daily_seed`] with a stable hash of the game id, so games
/// diverge from each other on a given day while each stays identical across
/// players and devices.
#[must_use]
pub fn game_seed(game: GameId, when: DateTime<Utc>) -> u32 {
    daily_seed(when)
        .wrapping_mul(31)
        .wrapping_add(stable_hash(game.as_str()))
        & SEED_MASK
}
