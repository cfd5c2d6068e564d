//! The part of a solution a constraint evaluation looks at.
//!
//! Every constraint match is anchored to exactly one scope element (a
//! committee, an assignment, a person or a time slot). Scoring a scope before
//! and after a change therefore yields the exact score delta, as long as the
//! scope holds every element whose matches the change can affect.

use committee_core::CommitteeSolution;

/// Sorted, de-duplicated indices of the elements to evaluate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    committees: Vec<usize>,
    assignments: Vec<usize>,
    persons: Vec<usize>,
    time_slots: Vec<usize>,
}

impl Scope {
    /// Every element of `solution`.
    pub fn full(solution: &CommitteeSolution) -> Self {
        Self {
            committees: (0..solution.committees().len()).collect(),
            assignments: (0..solution.committee_assignments().len()).collect(),
            persons: (0..solution.persons().len()).collect(),
            time_slots: (0..solution.time_slots().len()).collect(),
        }
    }

    /// Elements affected by moving `assignment` between two committees.
    ///
    /// Besides the assignment itself this holds every assignment that is a
    /// reciprocal partner of it under either committee, since their pair
    /// matches appear or vanish with the move.
    pub fn for_committee_change(
        solution: &CommitteeSolution,
        assignment: usize,
        old: Option<usize>,
        new: Option<usize>,
    ) -> Self {
        let person = solution.committee_assignments()[assignment].assigned_person();
        let committees = sorted(old.into_iter().chain(new));
        let partners = committees.iter().flat_map(|&c| {
            let evaluated = solution.committees()[c].evaluated_person();
            solution
                .assignments_of_person(evaluated)
                .iter()
                .copied()
                .filter(move |&b| {
                    b != assignment
                        && solution.committee_assignments()[b]
                            .committee()
                            .is_some_and(|k| solution.committees()[k].evaluated_person() == person)
                })
        });
        let assignments = sorted(std::iter::once(assignment).chain(partners));
        Self {
            committees,
            assignments,
            persons: vec![person],
            time_slots: Vec::new(),
        }
    }

    /// Elements affected by moving `committee` between two time slots.
    pub fn for_time_slot_change(committee: usize, old: Option<usize>, new: Option<usize>) -> Self {
        Self {
            committees: vec![committee],
            assignments: Vec::new(),
            persons: Vec::new(),
            time_slots: sorted(old.into_iter().chain(new)),
        }
    }

    pub fn committees(&self) -> &[usize] {
        &self.committees
    }

    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    pub fn persons(&self) -> &[usize] {
        &self.persons
    }

    pub fn time_slots(&self) -> &[usize] {
        &self.time_slots
    }

    #[inline]
    pub fn contains_assignment(&self, assignment: usize) -> bool {
        self.assignments.binary_search(&assignment).is_ok()
    }
}

fn sorted(indices: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut indices: Vec<usize> = indices.collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}
