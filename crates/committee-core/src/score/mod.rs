//! Score type for committee solutions.
//!
//! A committee solution is scored on three levels. Every constraint in the
//! catalog currently penalizes the hard level; the medium and soft levels are
//! kept for preference-style constraints.

#[macro_use]
mod macros;
mod hard_medium_soft;
mod traits;


pub use hard_medium_soft::HardMediumSoftScore;
pub use traits::{ParseableScore, Score, ScoreParseError};
