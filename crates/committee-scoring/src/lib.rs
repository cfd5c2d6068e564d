//! Constraint scoring for committee scheduling.
//!
//! This crate turns a (possibly partial) `CommitteeSolution` into a
//! `HardMediumSoftScore`:
//! - The constraint catalog (`committee_constraints`), an ordered list of
//!   `Constraint` values evaluated by a local loop
//! - Scoped evaluation, so a change is rescored only where it has effect
//! - The incremental `CommitteeScoreDirector`
//! - Score explanations with per-constraint matches and justifications

pub mod analysis;
pub mod catalog;
pub mod constraint;
pub mod director;
pub mod scope;

pub use analysis::{
    ConstraintAnalysis, ConstraintJustification, DetailedConstraintMatch, ScoreExplanation,
};
pub use catalog::committee_constraints;
pub use constraint::{Constraint, ConstraintStream, MatchTuple};
pub use director::{update_score, CommitteeScoreDirector};
pub use scope::Scope;
