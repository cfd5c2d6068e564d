//! Score trait shared by the scoring engine and the optimizer.

use std::fmt::{Debug, Display};
use std::ops::{Add, Neg, Sub};

/// Quality of a committee solution.
///
/// Higher is better. Levels are compared in priority order, so one hard point
/// outweighs any amount of medium or soft points.
pub trait Score:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Returns true when no hard constraint is broken.
    fn is_feasible(&self) -> bool;

    /// Returns the zero score (identity element for addition).
    fn zero() -> Self;

    /// Multiplies every level by a match weight.
    fn multiply(&self, multiplicand: i64) -> Self;

    /// Returns true if this score is better than the other score.
    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }
}

/// Scores with a textual `"0hard/0medium/0soft"` form.
pub trait ParseableScore: Score {
    /// Parses a score from its string representation.
    fn parse(s: &str) -> Result<Self, ScoreParseError>;

    /// Returns the string representation of this score.
    fn to_string_repr(&self) -> String;
}

/// Error when parsing a score from string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Score parse error: {message}")]
pub struct ScoreParseError {
    pub message: String,
}
