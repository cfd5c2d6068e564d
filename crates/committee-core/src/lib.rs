//! Committee Core - domain model for committee scheduling
//!
//! This crate provides the problem model that the scoring engine evaluates:
//! - Score type (`HardMediumSoftScore`)
//! - Participants, settings and primitive value types
//! - The planning entities (`Committee`, `CommitteeAssignment`) stored in an
//!   arena owned by `CommitteeSolution`, with an inverse index kept in sync
//!   with every decision-variable change
//! - The problem builder that derives the entity graph from a roster

pub mod constraint;
pub mod domain;
pub mod error;
pub mod score;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use constraint::ConstraintRef;
pub use domain::{
    AssignmentView, Committee, CommitteeAssignment, CommitteeSolution, CommitteeView,
    DistanceMatrix, Location, Person, PersonType, Range, Settings, Skill, SolverOptions,
    SolverStatus, TimeSlot,
};
pub use error::{CommitteeError, Result};
pub use score::{HardMediumSoftScore, ParseableScore, Score, ScoreParseError};
