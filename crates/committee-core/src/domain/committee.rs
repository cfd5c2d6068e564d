//! Committees: one evaluation session per evaluated person.

use std::collections::HashSet;
use std::fmt;

use super::assignment::AssignmentView;
use super::person::Person;
use super::settings::Settings;
use super::solution::CommitteeSolution;
use super::values::{PersonType, TimeSlot};

/// Planning entity whose variable is the time slot it meets in.
///
/// The evaluated person is fixed at construction. The assignments pointing at
/// this committee are not stored here: the owning [`CommitteeSolution`]
/// maintains them as an inverse index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committee {
    /// Name of the evaluated person.
    pub id: String,
    pub(crate) evaluated_person: usize,
    pub(crate) time_slot: Option<usize>,
}

impl Committee {
    pub(crate) fn new(id: impl Into<String>, evaluated_person: usize) -> Self {
        Self {
            id: id.into(),
            evaluated_person,
            time_slot: None,
        }
    }

    /// Index of the evaluated person in [`CommitteeSolution::persons`].
    #[inline]
    pub fn evaluated_person(&self) -> usize {
        self.evaluated_person
    }

    /// Index of the selected time slot, `None` while unassigned.
    #[inline]
    pub fn time_slot(&self) -> Option<usize> {
        self.time_slot
    }
}

/// A committee borrowed together with the solution it lives in.
///
/// All committee predicates go through this view because they need the
/// persons, settings and inverse index owned by the solution.
#[derive(Clone, Copy)]
pub struct CommitteeView<'a> {
    solution: &'a CommitteeSolution,
    index: usize,
}

impl<'a> CommitteeView<'a> {
    pub(crate) fn new(solution: &'a CommitteeSolution, index: usize) -> Self {
        Self { solution, index }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn committee(&self) -> &'a Committee {
        &self.solution.committees()[self.index]
    }

    pub fn id(&self) -> &'a str {
        &self.committee().id
    }

    pub fn evaluated_person(&self) -> &'a Person {
        &self.solution.persons()[self.committee().evaluated_person]
    }

    pub fn time_slot(&self) -> Option<&'a TimeSlot> {
        self.committee()
            .time_slot
            .map(|t| &self.solution.time_slots()[t])
    }

    pub fn settings(&self) -> &'a Settings {
        self.solution.settings()
    }

    /// Assignments currently pointing at this committee.
    pub fn assignments(&self) -> impl Iterator<Item = AssignmentView<'a>> + 'a {
        let solution = self.solution;
        solution
            .assignments_of(self.index)
            .iter()
            .map(move |&a| AssignmentView::new(solution, a))
    }

    /// Persons assigned to this committee, with repetitions.
    pub fn assigned_persons(&self) -> impl Iterator<Item = &'a Person> + 'a {
        self.assignments().map(|a| a.assigned_person())
    }

    pub fn assignment_count(&self) -> usize {
        self.solution.assignments_of(self.index).len()
    }

    pub fn duplicated_evaluator(&self) -> bool {
        let mut seen = HashSet::new();
        self.assignments()
            .any(|a| !seen.insert(a.assignment().assigned_person()))
    }

    fn number_of(&self, person_type: PersonType) -> i64 {
        self.assigned_persons()
            .filter(|p| p.person_type == person_type)
            .count() as i64
    }

    pub fn has_correct_number_of_max_professional_persons(&self) -> bool {
        self.number_of(PersonType::Professional) <= self.settings().nb_pro_participants.max()
    }

    pub fn has_correct_number_of_min_professional_persons(&self) -> bool {
        self.number_of(PersonType::Professional) >= self.settings().nb_pro_participants.min()
    }

    pub fn has_correct_number_of_max_non_professional_persons(&self) -> bool {
        self.number_of(PersonType::NonProfessional) <= self.settings().nb_non_pro_participants.max()
    }

    pub fn has_correct_number_of_min_non_professional_persons(&self) -> bool {
        self.number_of(PersonType::NonProfessional) >= self.settings().nb_non_pro_participants.min()
    }

    /// Fewer than two assigned evaluators can attend the selected slot.
    pub fn not_enough_available_evaluators(&self) -> bool {
        if !self.settings().uses_availability() {
            return false;
        }
        let time_slot = self.time_slot();
        self.assigned_persons()
            .filter(|p| p.is_available(time_slot))
            .count()
            < 2
    }

    pub fn evaluated_not_available(&self) -> bool {
        self.settings().uses_availability()
            && !self.evaluated_person().is_available(self.time_slot())
    }

    pub fn required_skills_not_satisfied(&self) -> bool {
        self.evaluated_person()
            .required_skills
            .iter()
            .any(|skill| !self.assigned_persons().any(|p| p.has_skill(skill)))
    }

    pub fn inspection_rotation_broken(&self) -> bool {
        let evaluated = self.evaluated_person();
        self.assigned_persons()
            .any(|p| p.has_already_inspected_in_the_past(evaluated))
    }

    /// The number of evaluators following up from last round is not exactly
    /// the configured count.
    pub fn inspection_follow_up_not_respected(&self) -> bool {
        let evaluated = self.evaluated_person();
        let nb_follow_up = self
            .assigned_persons()
            .filter(|p| p.has_already_inspected_last_time(evaluated))
            .count();
        nb_follow_up != self.settings().nb_inspectors_following_up as usize
    }
}

impl fmt::Display for CommitteeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Committee for: {} ({})", self.evaluated_person(), self.id())
    }
}

impl fmt::Debug for CommitteeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitteeView")
            .field("index", &self.index)
            .field("id", &self.id())
            .finish()
    }
}
