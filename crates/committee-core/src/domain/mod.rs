//! Committee scheduling domain model.
//!
//! Problem facts ([`Person`], [`TimeSlot`], [`Settings`]) are immutable once a
//! [`CommitteeSolution`] is built. The planning entities ([`Committee`],
//! [`CommitteeAssignment`]) live in the solution's arena and are read through
//! [`CommitteeView`] and [`AssignmentView`].

mod assignment;
mod builder;
mod committee;
mod inverse;
mod person;
mod settings;
mod solution;
mod time_slot;
mod values;

#[cfg(test)]
mod tests;

pub use assignment::{AssignmentView, CommitteeAssignment};
pub use committee::{Committee, CommitteeView};
pub use inverse::InverseIndex;
pub use person::Person;
pub use settings::{Settings, DEFAULT_ASSIGNMENTS_RANGE, DEFAULT_TRAVELLING_DISTANCE_RANGE};
pub use solution::{CommitteeSolution, SolverOptions, SolverStatus};
pub use values::{DistanceMatrix, Location, PersonType, Range, Skill, TimeSlot};
