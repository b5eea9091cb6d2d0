use rand::Rng;
use std::ops::RangeInclusive;

/// Range the first operand is drawn from
pub const OPERAND_A_RANGE: RangeInclusive<u32> = 6..=9;
/// Range the sum is drawn from
pub const RESULT_RANGE: RangeInclusive<u32> = 11..=14;

/// One of the two addends of the exercise.
///
/// Operand `A` is also the first arrow on the ruler, `B` the second one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    A,
    B,
}

impl Operand {
    /// Zero-based index, used for per-operand layout arrays
    pub fn index(self) -> usize {
        match self {
            Operand::A => 0,
            Operand::B => 1,
        }
    }
}

/// An addition exercise `a + b = result`.
///
/// Generated once per session and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exercise {
    a: u32,
    b: u32,
    result: u32,
}

impl Exercise {
    /// Draws `a` and `result` independently and derives `b` from them.
    ///
    /// With the ranges above `b` always lands in `2..=8`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let a = rng.gen_range(OPERAND_A_RANGE);
        let result = rng.gen_range(RESULT_RANGE);
        Self::new(a, result - a)
    }

    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b, result: a + b }
    }

    pub fn a(&self) -> u32 {
        self.a
    }

    pub fn b(&self) -> u32 {
        self.b
    }

    pub fn result(&self) -> u32 {
        self.result
    }

    pub fn operand(&self, operand: Operand) -> u32 {
        match operand {
            Operand::A => self.a,
            Operand::B => self.b,
        }
    }

    /// Left-hand side as drawn on the canvas, trailing space included
    pub fn equation_text(&self) -> String {
        format!("{} + {} = ", self.a, self.b)
    }

    pub fn result_text(&self) -> String {
        self.result.to_string()
    }

    /// Ruler span covered by the arrow of `operand`
    pub fn span(&self, operand: Operand) -> (u32, u32) {
        match operand {
            Operand::A => (0, self.a),
            Operand::B => (self.a, self.result),
        }
    }
}

impl std::fmt::Display for Exercise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {} = {}", self.a, self.b, self.result)
    }
}
