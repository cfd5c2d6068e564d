//! Constraints as data: a reference, a weight and a stream.
//!
//! A [`ConstraintStream`] says which tuples a constraint iterates and which of
//! them match. Evaluation is restricted to a [`Scope`] so the same code serves
//! full recomputation and incremental deltas.

use std::collections::HashMap;

use committee_core::score::Score;
use committee_core::{
    AssignmentView, CommitteeSolution, CommitteeView, ConstraintRef, HardMediumSoftScore, Person,
    Settings, TimeSlot,
};

use crate::analysis::{ConstraintAnalysis, ConstraintJustification, DetailedConstraintMatch};
use crate::scope::Scope;

/// How a constraint iterates a solution and decides what matches.
#[derive(Clone, Copy)]
pub enum ConstraintStream {
    /// Every committee, including those without a time slot.
    Committees(fn(&CommitteeView<'_>) -> bool),

    /// Every assignment whose committee is set.
    Assignments(fn(&AssignmentView<'_>) -> bool),

    /// Ordered pairs of distinct assigned assignments evaluating each other's
    /// evaluated person. A reciprocal relationship matches once from each side.
    ReciprocalPairs,

    /// Assigned assignments grouped by person, summed with `collect`, then
    /// kept when `filter` holds for the person and the sum.
    PersonGroups {
        collect: fn(&AssignmentView<'_>) -> i64,
        filter: fn(&Person, i64) -> bool,
    },

    /// Scheduled committees grouped by time slot and counted, then kept when
    /// `filter` holds for the slot and the count.
    TimeSlotGroups(fn(&TimeSlot, &Settings, i64) -> bool),
}

/// A tuple matched by a stream.
#[derive(Debug, Clone, Copy)]
pub enum MatchTuple<'a> {
    Committee(CommitteeView<'a>),
    Assignment(AssignmentView<'a>),
    Pair(AssignmentView<'a>, AssignmentView<'a>),
    PersonGroup(&'a Person, i64),
    TimeSlotGroup(&'a TimeSlot, i64),
}

impl MatchTuple<'_> {
    pub fn justification(&self) -> ConstraintJustification {
        let entities = match self {
            MatchTuple::Committee(c) => vec![c.to_string()],
            MatchTuple::Assignment(a) => vec![a.to_string()],
            MatchTuple::Pair(a, b) => vec![a.to_string(), b.to_string()],
            MatchTuple::PersonGroup(p, sum) => vec![p.to_string(), sum.to_string()],
            MatchTuple::TimeSlotGroup(t, count) => vec![t.to_string(), count.to_string()],
        };
        ConstraintJustification::new(entities)
    }
}

/// A penalizing constraint of the catalog.
#[derive(Clone)]
pub struct Constraint {
    pub constraint_ref: ConstraintRef,
    /// Penalty of one match, as a positive score.
    pub weight: HardMediumSoftScore,
    pub stream: ConstraintStream,
}

impl Constraint {
    pub fn new(name: &str, weight: HardMediumSoftScore, stream: ConstraintStream) -> Self {
        Self {
            constraint_ref: ConstraintRef::committee(name),
            weight,
            stream,
        }
    }

    pub fn name(&self) -> &str {
        &self.constraint_ref.name
    }

    /// Score impact of a single match.
    pub fn impact(&self) -> HardMediumSoftScore {
        -self.weight
    }

    /// Score of the matches anchored in `scope`.
    pub fn evaluate(&self, solution: &CommitteeSolution, scope: &Scope) -> HardMediumSoftScore {
        let mut count = 0i64;
        self.for_each_match(solution, scope, |_| count += 1);
        self.impact().multiply(count)
    }

    /// Number of matches anchored in `scope`.
    pub fn match_count(&self, solution: &CommitteeSolution, scope: &Scope) -> usize {
        let mut count = 0;
        self.for_each_match(solution, scope, |_| count += 1);
        count
    }

    /// Full analysis of this constraint over `solution`.
    pub fn analyze(&self, solution: &CommitteeSolution) -> ConstraintAnalysis<HardMediumSoftScore> {
        let mut matches = Vec::new();
        self.for_each_match(solution, &Scope::full(solution), |tuple| {
            matches.push(DetailedConstraintMatch::new(
                self.constraint_ref.clone(),
                self.impact(),
                tuple.justification(),
            ));
        });
        ConstraintAnalysis::new(self.constraint_ref.clone(), self.impact(), matches)
    }

    /// Calls `on_match` for every tuple of `scope` this constraint matches.
    pub fn for_each_match<'a>(
        &self,
        solution: &'a CommitteeSolution,
        scope: &Scope,
        mut on_match: impl FnMut(MatchTuple<'a>),
    ) {
        match self.stream {
            ConstraintStream::Committees(filter) => {
                for &c in scope.committees() {
                    let committee = solution.committee(c);
                    if filter(&committee) {
                        on_match(MatchTuple::Committee(committee));
                    }
                }
            }
            ConstraintStream::Assignments(filter) => {
                for &a in scope.assignments() {
                    let assignment = solution.assignment(a);
                    if assignment.committee().is_some() && filter(&assignment) {
                        on_match(MatchTuple::Assignment(assignment));
                    }
                }
            }
            ConstraintStream::ReciprocalPairs => {
                for &a in scope.assignments() {
                    for b in reciprocal_partners(solution, a) {
                        on_match(MatchTuple::Pair(solution.assignment(a), solution.assignment(b)));
                    }
                }
            }
            ConstraintStream::PersonGroups { collect, filter } => {
                for &p in scope.persons() {
                    let mut assigned = solution
                        .assignments_of_person(p)
                        .iter()
                        .map(|&a| solution.assignment(a))
                        .filter(|a| a.committee().is_some())
                        .peekable();
                    if assigned.peek().is_none() {
                        continue;
                    }
                    let sum: i64 = assigned.map(|a| collect(&a)).sum();
                    let person = &solution.persons()[p];
                    if filter(person, sum) {
                        on_match(MatchTuple::PersonGroup(person, sum));
                    }
                }
            }
            ConstraintStream::TimeSlotGroups(filter) => {
                for &t in scope.time_slots() {
                    let count = solution.committees_in(t).len() as i64;
                    let time_slot = &solution.time_slots()[t];
                    if count > 0 && filter(time_slot, solution.settings(), count) {
                        on_match(MatchTuple::TimeSlotGroup(time_slot, count));
                    }
                }
            }
        }
    }
}

/// Assignments `b != a` such that `a` evaluates the person `b` belongs to
/// and `b` evaluates the person `a` belongs to.
fn reciprocal_partners(
    solution: &CommitteeSolution,
    a: usize,
) -> impl Iterator<Item = usize> + '_ {
    let assignment = &solution.committee_assignments()[a];
    let evaluated = assignment
        .committee()
        .map(|c| solution.committees()[c].evaluated_person());
    let person = assignment.assigned_person();

    evaluated
        .map(|e| solution.assignments_of_person(e))
        .unwrap_or(&[])
        .iter()
        .copied()
        .filter(move |&b| {
            b != a
                && solution.committee_assignments()[b]
                    .committee()
                    .is_some_and(|c| solution.committees()[c].evaluated_person() == person)
        })
}

/// Sums the score of several constraints over the same scope.
pub fn evaluate_all(
    constraints: &[Constraint],
    solution: &CommitteeSolution,
    scope: &Scope,
) -> HardMediumSoftScore {
    constraints
        .iter()
        .map(|c| c.evaluate(solution, scope))
        .fold(HardMediumSoftScore::ZERO, |acc, s| acc + s)
}

/// Match counts keyed by constraint name, for diagnostics.
pub fn match_counts(
    constraints: &[Constraint],
    solution: &CommitteeSolution,
) -> HashMap<String, usize> {
    let scope = Scope::full(solution);
    constraints
        .iter()
        .map(|c| (c.name().to_string(), c.match_count(solution, &scope)))
        .collect()
}
