//! Committee assignments: one evaluator slot each.

use std::fmt;

use super::committee::CommitteeView;
use super::person::Person;
use super::solution::CommitteeSolution;

/// Planning entity whose variable is the committee it serves on.
///
/// The assigned person never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitteeAssignment {
    pub id: u64,
    pub(crate) assigned_person: usize,
    pub(crate) committee: Option<usize>,
}

impl CommitteeAssignment {
    pub(crate) fn new(id: u64, assigned_person: usize) -> Self {
        Self {
            id,
            assigned_person,
            committee: None,
        }
    }

    /// Index of the assigned person in [`CommitteeSolution::persons`].
    #[inline]
    pub fn assigned_person(&self) -> usize {
        self.assigned_person
    }

    /// Index of the selected committee, `None` while unassigned.
    #[inline]
    pub fn committee(&self) -> Option<usize> {
        self.committee
    }
}

/// An assignment borrowed together with its solution.
#[derive(Clone, Copy)]
pub struct AssignmentView<'a> {
    solution: &'a CommitteeSolution,
    index: usize,
}

impl<'a> AssignmentView<'a> {
    pub(crate) fn new(solution: &'a CommitteeSolution, index: usize) -> Self {
        Self { solution, index }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn assignment(&self) -> &'a CommitteeAssignment {
        &self.solution.committee_assignments()[self.index]
    }

    pub fn assigned_person(&self) -> &'a Person {
        &self.solution.persons()[self.assignment().assigned_person]
    }

    pub fn committee(&self) -> Option<CommitteeView<'a>> {
        self.assignment()
            .committee
            .map(|c| CommitteeView::new(self.solution, c))
    }

    /// The assigned person evaluates themself.
    pub fn is_self_conflict(&self) -> bool {
        self.committee()
            .is_some_and(|c| c.committee().evaluated_person() == self.assignment().assigned_person)
    }

    /// The assigned person and the evaluated person veto each other.
    pub fn is_vetoed(&self) -> bool {
        self.committee()
            .is_some_and(|c| self.assigned_person().is_vetoed(c.evaluated_person()))
    }

    /// Travel distance from the evaluator to the evaluated person.
    ///
    /// 0 while the committee is unset, when either location is missing, or
    /// when the settings carry no distance matrix.
    pub fn distance(&self) -> i64 {
        let Some(committee) = self.committee() else {
            return 0;
        };
        match (
            self.assigned_person().location_name(),
            committee.evaluated_person().location_name(),
        ) {
            (Some(from), Some(to)) => self.solution.settings().distance(from, to),
            _ => 0,
        }
    }
}

impl fmt::Display for AssignmentView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitteeAssignment: assigned person {}", self.assigned_person())?;
        if let Some(committee) = self.committee() {
            write!(f, " for {}", committee)?;
        }
        write!(f, " ({})", self.assignment().id)
    }
}

impl fmt::Debug for AssignmentView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssignmentView")
            .field("index", &self.index)
            .field("id", &self.assignment().id)
            .finish()
    }
}
