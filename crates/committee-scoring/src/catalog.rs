//! The committee scheduling constraint catalog.

use committee_core::HardMediumSoftScore;

use crate::constraint::{Constraint, ConstraintStream};

pub const SELF_CONFLICT: &str = "Self conflict";
pub const DUPLICATED_EVALUATOR: &str =
    "A person cannot be assigned multiple times to the same committee";
pub const MAX_PROFESSIONAL: &str = "Max number of professional";
pub const MIN_PROFESSIONAL: &str = "Min number of professional";
pub const MAX_NON_PROFESSIONAL: &str = "Max number of non professional";
pub const MIN_NON_PROFESSIONAL: &str = "Min number of non professional";
pub const NOT_ENOUGH_AVAILABLE_EVALUATORS: &str = "Not enough available evaluators for the meeting";
pub const EVALUATED_NOT_AVAILABLE: &str = "Evaluated must be available for the meeting";
pub const REQUIRED_SKILLS: &str = "Required skills";
pub const NON_RECIPROCITY: &str = "Non-reciprocity";
pub const INSPECTION_ROTATION: &str = "Inspector rotation not respected";
pub const INSPECTION_FOLLOW_UP: &str = "Inspector follow up not respected";
pub const VETO: &str = "Veto";
pub const TRAVELLING_DISTANCE: &str = "Travelling distance range";
pub const MAX_INSPECTIONS: &str = "Max number of inspections";
pub const COMMITTEES_PER_TIME_SLOT: &str = "Number of committees for a given timeslot";

/// Returns every constraint, in evaluation order. All are hard.
pub fn committee_constraints() -> Vec<Constraint> {
    use ConstraintStream::*;

    vec![
        Constraint::new(
            SELF_CONFLICT,
            HardMediumSoftScore::of_hard(1_000_000),
            Assignments(|a| a.is_self_conflict()),
        ),
        Constraint::new(
            DUPLICATED_EVALUATOR,
            HardMediumSoftScore::of_hard(1_000_000),
            Committees(|c| c.duplicated_evaluator()),
        ),
        Constraint::new(
            MAX_PROFESSIONAL,
            HardMediumSoftScore::of_hard(1_000),
            Committees(|c| !c.has_correct_number_of_max_professional_persons()),
        ),
        Constraint::new(
            MIN_PROFESSIONAL,
            HardMediumSoftScore::of_hard(100),
            Committees(|c| !c.has_correct_number_of_min_professional_persons()),
        ),
        Constraint::new(
            MAX_NON_PROFESSIONAL,
            HardMediumSoftScore::of_hard(1_000),
            Committees(|c| !c.has_correct_number_of_max_non_professional_persons()),
        ),
        Constraint::new(
            MIN_NON_PROFESSIONAL,
            HardMediumSoftScore::of_hard(100),
            Committees(|c| !c.has_correct_number_of_min_non_professional_persons()),
        ),
        Constraint::new(
            NOT_ENOUGH_AVAILABLE_EVALUATORS,
            HardMediumSoftScore::of_hard(2),
            Committees(|c| c.not_enough_available_evaluators()),
        ),
        Constraint::new(
            EVALUATED_NOT_AVAILABLE,
            HardMediumSoftScore::of_hard(2),
            Committees(|c| c.evaluated_not_available()),
        ),
        Constraint::new(
            REQUIRED_SKILLS,
            HardMediumSoftScore::of_hard(2),
            Committees(|c| c.required_skills_not_satisfied()),
        ),
        Constraint::new(NON_RECIPROCITY, HardMediumSoftScore::of_hard(100), ReciprocalPairs),
        Constraint::new(
            INSPECTION_ROTATION,
            HardMediumSoftScore::ONE_HARD,
            Committees(|c| c.inspection_rotation_broken()),
        ),
        Constraint::new(
            INSPECTION_FOLLOW_UP,
            HardMediumSoftScore::ONE_HARD,
            Committees(|c| c.inspection_follow_up_not_respected()),
        ),
        Constraint::new(VETO, HardMediumSoftScore::ONE_HARD, Assignments(|a| a.is_vetoed())),
        Constraint::new(
            TRAVELLING_DISTANCE,
            HardMediumSoftScore::ONE_HARD,
            PersonGroups {
                collect: |a| a.distance(),
                filter: |person, total| person.is_not_travelling_in_range(total),
            },
        ),
        Constraint::new(
            MAX_INSPECTIONS,
            HardMediumSoftScore::ONE_HARD,
            PersonGroups {
                collect: |_| 1,
                filter: |person, count| {
                    person.max_number_of_inspections.is_some_and(|max| count > max)
                },
            },
        ),
        Constraint::new(
            COMMITTEES_PER_TIME_SLOT,
            HardMediumSoftScore::ONE_HARD,
            TimeSlotGroups(|slot, settings, count| {
                !slot.is_number_of_committees_in_range(settings, count)
            }),
        ),
    ]
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
