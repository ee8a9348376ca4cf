//! Mental arithmetic under time pressure.
//!
//! Each level is a batch of five problems. Addition and subtraction are
//! always available; multiplication unlocks at level 3 and division at
//! level 6. Operands grow with level and difficulty, capped so problems stay
//! head-computable. Division is built divisor-first so the answer is always
//! an exact integer.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameId, SeededRng};

use super::{
    batch_bonus, GameRules, GameView, InputEvent, InputResponse, LevelContext, PlayContext,
    Progress, Verdict,
};

/// Problems per level.
pub const PROBLEMS_PER_LEVEL: u32 = 5;

/// Base points for a correct answer.
const BASE_POINTS: u32 = 15;
/// Extra points for the harder operators.
const OPERATOR_BONUS: u32 = 10;

/// Arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '−',
            Operator::Mul => '×',
            Operator::Div => '÷',
        }
    }

    /// Whether this operator pays the harder-operator bonus.
    #[must_use]
    pub const fn is_advanced(self) -> bool {
        matches!(self, Operator::Mul | Operator::Div)
    }
}

/// One generated problem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Left operand.
    pub a: i64,
    /// Operator.
    pub op: Operator,
    /// Right operand.
    pub b: i64,
    answer: i64,
}

impl Problem {
    /// The expected answer.
    #[must_use]
    pub fn answer(&self) -> i64 {
        self.answer
    }
}

/// Rules implementor for the arithmetic game.
#[derive(Clone, Debug, Default)]
pub struct ArithmeticGame {
    problem: Option<Problem>,
    answered: u32,
    correct: u32,
    level: u32,
    difficulty: u8,
}

impl ArithmeticGame {
    /// Create the variant. Content appears on the first `generate_level`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Operators unlocked at a level.
    fn operator_pool(level: u32) -> SmallVec<[Operator; 4]> {
        let mut pool: SmallVec<[Operator; 4]> = SmallVec::new();
        pool.push(Operator::Add);
        pool.push(Operator::Sub);
        if level >= 3 {
            pool.push(Operator::Mul);
        }
        if level >= 6 {
            pool.push(Operator::Div);
        }
        pool
    }

    fn next_problem(&mut self, rng: &mut SeededRng) {
        let level = i64::from(self.level);
        let difficulty = i64::from(self.difficulty);
        let pool = Self::operator_pool(self.level);
        let op = *rng.pick(&pool).expect("operator pool is never empty");

        let problem = match op {
            Operator::Add => {
                let hi = (level * 5 + difficulty * 3).min(99);
                let a = rng.next_int(1, hi);
                let b = rng.next_int(1, hi);
                Problem { a, op, b, answer: a + b }
            }
            Operator::Sub => {
                let hi = (level * 5 + difficulty * 3).min(99);
                let x = rng.next_int(1, hi);
                let y = rng.next_int(1, hi);
                // Minuend first so the result is never negative.
                let (a, b) = if x >= y { (x, y) } else { (y, x) };
                Problem { a, op, b, answer: a - b }
            }
            Operator::Mul => {
                let hi = (2 + level + difficulty / 3).min(12);
                let a = rng.next_int(2, hi);
                let b = rng.next_int(2, hi);
                Problem { a, op, b, answer: a * b }
            }
            Operator::Div => {
                // Divisor and quotient first; the dividend is their product,
                // so the division is always exact.
                let divisor = rng.next_int(2, 9);
                let quotient = rng.next_int(2, (2 + level).min(12));
                Problem {
                    a: divisor * quotient,
                    op,
                    b: divisor,
                    answer: quotient,
                }
            }
        };

        self.problem = Some(problem);
    }

    fn time_limit(&self) -> u64 {
        let level = u64::from(self.level);
        let difficulty = u64::from(self.difficulty);
        15_000u64.saturating_sub(level * 500 + difficulty * 300).max(5_000)
    }

    /// Advance the batch after a judged answer; the fifth answer clears the
    /// level instead of producing a sixth problem.
    fn advance(&mut self, mut response: InputResponse, rng: &mut SeededRng) -> InputResponse {
        self.answered += 1;
        if self.answered >= PROBLEMS_PER_LEVEL {
            self.problem = None;
            response = response.clearing(batch_bonus(self.correct, PROBLEMS_PER_LEVEL));
        } else {
            self.next_problem(rng);
        }
        response
    }
}

impl GameRules for ArithmeticGame {
    fn game(&self) -> GameId {
        GameId::Arithmetic
    }

    fn generate_level(&mut self, ctx: &mut LevelContext<'_>) {
        self.level = ctx.level;
        self.difficulty = ctx.difficulty;
        self.answered = 0;
        self.correct = 0;
        self.next_problem(ctx.rng);
    }

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut PlayContext<'_>) -> InputResponse {
        let InputEvent::Answer(value) = input else {
            return InputResponse::IGNORED;
        };
        let Some(problem) = &self.problem else {
            return InputResponse::IGNORED;
        };

        let verdict = if *value == problem.answer {
            let limit = self.time_limit();
            let time_bonus = (limit.saturating_sub(ctx.response_ms()) / 200) as u32;
            let operator_bonus = if problem.op.is_advanced() { OPERATOR_BONUS } else { 0 };
            self.correct += 1;
            Verdict::Correct {
                points: BASE_POINTS + time_bonus + operator_bonus,
            }
        } else {
            Verdict::Incorrect { costs_life: true }
        };

        self.advance(InputResponse::of(verdict), ctx.rng)
    }

    fn handle_timeout(&mut self, ctx: &mut PlayContext<'_>) -> InputResponse {
        if self.problem.is_none() {
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
            total: PROBLEMS_PER_LEVEL,
        }
    }

    fn view(&self) -> GameView<'_> {
        GameView::Arithmetic(self.problem.as_ref())
    }
}
