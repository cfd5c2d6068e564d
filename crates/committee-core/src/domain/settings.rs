//! Problem-wide policy shared by every entity of a solution.

use serde::{Deserialize, Serialize};

use super::values::{DistanceMatrix, PersonType, Range};
use crate::error::{CommitteeError, Result};

/// Default number of assignments for a participant whose type has no range.
pub const DEFAULT_ASSIGNMENTS_RANGE: Range = Range::new(0, 5);

/// Default travel budget for a participant.
pub const DEFAULT_TRAVELLING_DISTANCE_RANGE: Range = Range::new(0, 100);

/// Numeric policy knobs supplied once per problem instance.
///
/// Every field is optional on the wire: absent ranges fall back to permissive
/// defaults and an absent distance matrix makes every distance 0. Availability
/// constraints apply unless `useAvailability` is explicitly `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub nb_pro_participants: Range,
    pub number_of_assignments_for_a_professional: Range,

    pub nb_non_pro_participants: Range,
    pub number_of_assignments_for_a_non_professional: Range,

    pub nb_external_participants: Range,
    pub number_of_assignments_for_an_external: Range,

    /// How many past rounds the client keeps in each inspection history.
    pub nb_rotations_to_reinspect: u32,
    /// Exact number of evaluators who must have inspected the person last time.
    pub nb_inspectors_following_up: u32,

    pub distance_matrix: Option<DistanceMatrix>,
    pub travelling_distance_range: Range,

    pub use_availability: Option<bool>,
    pub shuffle_participants: Option<bool>,

    /// Allowed number of committees meeting in the same time slot.
    pub committee_meeting_size: Range,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nb_pro_participants: Range::unbounded(),
            number_of_assignments_for_a_professional: DEFAULT_ASSIGNMENTS_RANGE,
            nb_non_pro_participants: Range::unbounded(),
            number_of_assignments_for_a_non_professional: DEFAULT_ASSIGNMENTS_RANGE,
            nb_external_participants: Range::unbounded(),
            number_of_assignments_for_an_external: DEFAULT_ASSIGNMENTS_RANGE,
            nb_rotations_to_reinspect: 0,
            nb_inspectors_following_up: 0,
            distance_matrix: None,
            travelling_distance_range: DEFAULT_TRAVELLING_DISTANCE_RANGE,
            use_availability: None,
            shuffle_participants: None,
            committee_meeting_size: Range::unbounded(),
        }
    }
}

impl Settings {
    /// Returns how many assignment slots a participant of `person_type` receives.
    pub fn number_of_assignments_range(&self, person_type: PersonType) -> Range {
        match person_type {
            PersonType::Professional => self.number_of_assignments_for_a_professional,
            PersonType::NonProfessional => self.number_of_assignments_for_a_non_professional,
            PersonType::External => self.number_of_assignments_for_an_external,
            PersonType::Undefined => DEFAULT_ASSIGNMENTS_RANGE,
        }
    }

    /// Returns the allowed number of evaluators of `person_type` on one committee.
    pub fn participants_range(&self, person_type: PersonType) -> Option<Range> {
        match person_type {
            PersonType::Professional => Some(self.nb_pro_participants),
            PersonType::NonProfessional => Some(self.nb_non_pro_participants),
            PersonType::External => Some(self.nb_external_participants),
            PersonType::Undefined => None,
        }
    }

    /// Checks that every range is non-negative with `min <= max`.
    pub fn validate(&self) -> Result<()> {
        let ranges = [
            ("nbProParticipants", self.nb_pro_participants),
            ("numberOfAssignmentsForAProfessional", self.number_of_assignments_for_a_professional),
            ("nbNonProParticipants", self.nb_non_pro_participants),
            (
                "numberOfAssignmentsForANonProfessional",
                self.number_of_assignments_for_a_non_professional,
            ),
            ("nbExternalParticipants", self.nb_external_participants),
            ("numberOfAssignmentsForAnExternal", self.number_of_assignments_for_an_external),
            ("travellingDistanceRange", self.travelling_distance_range),
            ("committeeMeetingSize", self.committee_meeting_size),
        ];
        match ranges
            .into_iter()
            .find(|(_, range)| range.min() < 0 || range.min() > range.max())
        {
            Some((field, range)) => Err(CommitteeError::InvalidRange {
                field,
                min: range.min(),
                max: range.max(),
            }),
            None => Ok(()),
        }
    }

    pub fn uses_availability(&self) -> bool {
        self.use_availability.unwrap_or(true)
    }

    pub fn shuffles_participants(&self) -> bool {
        self.shuffle_participants.unwrap_or(false)
    }

    /// Distance between two location names, 0 without a matrix.
    pub fn distance(&self, from: &str, to: &str) -> i64 {
        self.distance_matrix
            .as_ref()
            .map_or(0, |matrix| matrix.distance(from, to))
    }
}
