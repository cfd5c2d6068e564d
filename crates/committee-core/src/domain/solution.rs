//! The planning solution: owner of every fact and entity of one problem.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;

use super::assignment::{AssignmentView, CommitteeAssignment};
use super::committee::{Committee, CommitteeView};
use super::inverse::InverseIndex;
use super::person::Person;
use super::settings::Settings;
use super::values::{same_name, TimeSlot};
use crate::error::{CommitteeError, Result};
use crate::score::HardMediumSoftScore;

/// Whether a solver job is currently running for a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    #[default]
    NotSolving,
    Solving,
}

impl SolverStatus {
    pub fn is_solving(self) -> bool {
        matches!(self, SolverStatus::Solving)
    }
}

/// Request payload of a solve: the settings and the roster.
#[derive(Debug, Clone, Default, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverOptions {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub participants: Vec<Person>,
}

impl SolverOptions {
    /// Parses a `{settings, participants}` payload.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A committee scheduling problem together with its current candidate.
///
/// Entities reference each other by index into the vectors owned here. The
/// two decision variables (`Committee::time_slot` and
/// `CommitteeAssignment::committee`) can only be changed through
/// [`set_time_slot`](Self::set_time_slot) and
/// [`set_committee`](Self::set_committee), which keep the inverse indexes in
/// step with the change.
#[derive(Debug, Clone)]
pub struct CommitteeSolution {
    pub id: String,
    settings: Arc<Settings>,
    persons: Vec<Person>,
    time_slots: Vec<TimeSlot>,
    committees: Vec<Committee>,
    committee_assignments: Vec<CommitteeAssignment>,

    assignments_by_committee: InverseIndex,
    committees_by_time_slot: InverseIndex,
    assignments_by_person: Vec<Vec<usize>>,
    committee_by_person: Vec<Option<usize>>,

    pub score: Option<HardMediumSoftScore>,
    pub score_explanation: Option<String>,
    pub solver_status: Option<SolverStatus>,
}

impl CommitteeSolution {
    /// Assembles a solution from already derived collections.
    ///
    /// All variables start unset. Use [`CommitteeSolution::new`] to derive the
    /// collections from a roster.
    pub(crate) fn from_parts(
        id: String,
        settings: Arc<Settings>,
        persons: Vec<Person>,
        time_slots: Vec<TimeSlot>,
        committees: Vec<Committee>,
        committee_assignments: Vec<CommitteeAssignment>,
    ) -> Self {
        let mut assignments_by_person = vec![Vec::new(); persons.len()];
        for (i, assignment) in committee_assignments.iter().enumerate() {
            assignments_by_person[assignment.assigned_person].push(i);
        }
        let mut committee_by_person = vec![None; persons.len()];
        for (i, committee) in committees.iter().enumerate() {
            committee_by_person[committee.evaluated_person] = Some(i);
        }

        Self {
            id,
            settings,
            assignments_by_committee: InverseIndex::new(committees.len()),
            committees_by_time_slot: InverseIndex::new(time_slots.len()),
            persons,
            time_slots,
            committees,
            committee_assignments,
            assignments_by_person,
            committee_by_person,
            score: None,
            score_explanation: None,
            solver_status: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable settings, cloned first if shared with another solution.
    ///
    /// Persons keep the ranges copied from the settings at build time.
    pub fn settings_mut(&mut self) -> &mut Settings {
        Arc::make_mut(&mut self.settings)
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    pub fn committees(&self) -> &[Committee] {
        &self.committees
    }

    pub fn committee_assignments(&self) -> &[CommitteeAssignment] {
        &self.committee_assignments
    }

    pub fn committee(&self, index: usize) -> CommitteeView<'_> {
        CommitteeView::new(self, index)
    }

    pub fn assignment(&self, index: usize) -> AssignmentView<'_> {
        AssignmentView::new(self, index)
    }

    pub fn committee_views(&self) -> impl Iterator<Item = CommitteeView<'_>> + '_ {
        (0..self.committees.len()).map(move |i| CommitteeView::new(self, i))
    }

    pub fn assignment_views(&self) -> impl Iterator<Item = AssignmentView<'_>> + '_ {
        (0..self.committee_assignments.len()).map(move |i| AssignmentView::new(self, i))
    }

    /// Assignments whose committee is `committee`, ascending.
    pub fn assignments_of(&self, committee: usize) -> &[usize] {
        self.assignments_by_committee.get(committee)
    }

    /// Committees meeting in `time_slot`, ascending.
    pub fn committees_in(&self, time_slot: usize) -> &[usize] {
        self.committees_by_time_slot.get(time_slot)
    }

    /// Every assignment slot of `person`, set or not.
    pub fn assignments_of_person(&self, person: usize) -> &[usize] {
        &self.assignments_by_person[person]
    }

    /// The committee evaluating `person`, if they need evaluation.
    pub fn committee_of_person(&self, person: usize) -> Option<usize> {
        self.committee_by_person[person]
    }

    /// Points `assignment` at `committee` and returns the previous value.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn set_committee(&mut self, assignment: usize, committee: Option<usize>) -> Option<usize> {
        if let Some(c) = committee {
            assert!(c < self.committees.len(), "committee index {c} out of bounds");
        }
        let old = std::mem::replace(
            &mut self.committee_assignments[assignment].committee,
            committee,
        );
        self.assignments_by_committee.update(old, committee, assignment);
        old
    }

    /// Schedules `committee` in `time_slot` and returns the previous value.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn set_time_slot(&mut self, committee: usize, time_slot: Option<usize>) -> Option<usize> {
        if let Some(t) = time_slot {
            assert!(t < self.time_slots.len(), "time slot index {t} out of bounds");
        }
        let old = std::mem::replace(&mut self.committees[committee].time_slot, time_slot);
        self.committees_by_time_slot.update(old, time_slot, committee);
        old
    }

    pub fn person_index(&self, name: &str) -> Option<usize> {
        self.persons.iter().position(|p| same_name(&p.name, name))
    }

    pub fn person_by_name(&self, name: &str) -> Option<&Person> {
        self.person_index(name).map(|i| &self.persons[i])
    }

    pub fn time_slot_index(&self, name: &str) -> Option<usize> {
        self.time_slots.iter().position(|t| same_name(&t.name, name))
    }

    pub fn committee_by_evaluated_person_name(&self, name: &str) -> Option<CommitteeView<'_>> {
        self.person_index(name)
            .and_then(|p| self.committee_by_person[p])
            .map(|c| CommitteeView::new(self, c))
    }

    /// Puts `evaluator` on the committee of `evaluated`, using the first free
    /// assignment slot of the evaluator. Returns the assignment index.
    pub fn assign_by_name(&mut self, evaluator: &str, evaluated: &str) -> Result<usize> {
        let person = self.person_index(evaluator).ok_or_else(|| unknown("person", evaluator))?;
        let committee = self
            .committee_by_evaluated_person_name(evaluated)
            .map(|c| c.index())
            .ok_or_else(|| unknown("committee", evaluated))?;
        let assignment = self.assignments_by_person[person]
            .iter()
            .copied()
            .find(|&a| self.committee_assignments[a].committee.is_none())
            .ok_or_else(|| unknown("free assignment", evaluator))?;
        self.set_committee(assignment, Some(committee));
        Ok(assignment)
    }

    /// Schedules the committee of `evaluated` in the slot named `time_slot`.
    pub fn schedule_by_name(&mut self, evaluated: &str, time_slot: &str) -> Result<usize> {
        let committee = self
            .committee_by_evaluated_person_name(evaluated)
            .map(|c| c.index())
            .ok_or_else(|| unknown("committee", evaluated))?;
        let slot = self.time_slot_index(time_slot).ok_or_else(|| unknown("time slot", time_slot))?;
        self.set_time_slot(committee, Some(slot));
        Ok(committee)
    }

    /// Number of decision variables currently set.
    pub fn assigned_count(&self) -> usize {
        self.assignments_by_committee.member_count() + self.committees_by_time_slot.member_count()
    }
}

fn unknown(kind: &'static str, key: &str) -> CommitteeError {
    CommitteeError::UnknownEntity {
        kind,
        key: key.to_string(),
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct CommitteeRepr<'a> {
    id: &'a str,
    evaluated_person: &'a Person,
    time_slot: Option<&'a TimeSlot>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignmentRepr<'a> {
    id: u64,
    assigned_person: &'a Person,
    committee: Option<CommitteeRepr<'a>>,
}

impl Serialize for CommitteeSolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let assignments: Vec<AssignmentRepr<'_>> = self
            .assignment_views()
            .map(|a| AssignmentRepr {
                id: a.assignment().id,
                assigned_person: a.assigned_person(),
                committee: a.committee().map(|c| CommitteeRepr {
                    id: c.id(),
                    evaluated_person: c.evaluated_person(),
                    time_slot: c.time_slot(),
                }),
            })
            .collect();

        let mut state = serializer.serialize_struct("CommitteeSolution", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("settings", self.settings.as_ref())?;
        state.serialize_field("committeeAssignments", &assignments)?;
        state.serialize_field("score", &self.score)?;
        state.serialize_field("scoreExplanation", &self.score_explanation)?;
        state.serialize_field("solverStatus", &self.solver_status)?;
        state.end()
    }
}
