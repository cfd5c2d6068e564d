//! Score director for committee solutions.
//!
//! `CommitteeScoreDirector` owns the working solution and is the only way the
//! optimizer changes it. Each change rescores the neighbourhood it touches
//! (see [`Scope`]) and adds the delta to the cached score.

use committee_core::{CommitteeSolution, HardMediumSoftScore};
use tracing::{debug, trace};

use crate::analysis::ScoreExplanation;
use crate::catalog::committee_constraints;
use crate::constraint::{evaluate_all, Constraint};
use crate::scope::Scope;


/// Incremental score director over the constraint catalog.
///
/// # Example
///
/// ```
/// use committee_core::{CommitteeSolution, Person, PersonType, Score, Settings, SolverOptions};
/// use committee_scoring::CommitteeScoreDirector;
///
/// let options = SolverOptions {
///     settings: Settings::default(),
///     participants: vec![
///         Person::new("Ann", PersonType::Professional).needing_evaluation(),
///         Person::new("Bob", PersonType::Professional),
///     ],
/// };
/// let solution = CommitteeSolution::new("demo", options).unwrap();
/// let mut director = CommitteeScoreDirector::new(solution);
///
/// // Nobody sits on Ann's committee and it has no time slot yet.
/// let before = director.calculate_score();
/// assert!(!before.is_feasible());
///
/// let bob = director.working_solution().assignments_of_person(1)[0];
/// director.change_committee(bob, Some(0));
/// assert_eq!(director.get_score(), director.calculate_score());
/// ```
pub struct CommitteeScoreDirector {
    working_solution: CommitteeSolution,
    constraints: Vec<Constraint>,
    cached_score: HardMediumSoftScore,
    initialized: bool,
}

impl CommitteeScoreDirector {
    /// Creates a director scoring with [`committee_constraints`].
    pub fn new(solution: CommitteeSolution) -> Self {
        Self::with_constraints(solution, committee_constraints())
    }

    pub fn with_constraints(solution: CommitteeSolution, constraints: Vec<Constraint>) -> Self {
        Self {
            working_solution: solution,
            constraints,
            cached_score: HardMediumSoftScore::ZERO,
            initialized: false,
        }
    }

    pub fn working_solution(&self) -> &CommitteeSolution {
        &self.working_solution
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Recomputes the score from scratch and caches it.
    pub fn calculate_score(&mut self) -> HardMediumSoftScore {
        let scope = Scope::full(&self.working_solution);
        self.cached_score = evaluate_all(&self.constraints, &self.working_solution, &scope);
        self.initialized = true;
        trace!(event = "score_calculated", score = %self.cached_score);
        self.cached_score
    }

    /// Returns the cached score, calculating it on first use.
    pub fn score(&mut self) -> HardMediumSoftScore {
        if !self.initialized {
            self.calculate_score();
        }
        self.cached_score
    }

    /// Returns the cached score without recalculation.
    ///
    /// Zero until the director is initialized.
    #[inline]
    pub fn get_score(&self) -> HardMediumSoftScore {
        self.cached_score
    }

    /// Moves `assignment` to `committee` and returns its previous committee.
    pub fn change_committee(
        &mut self,
        assignment: usize,
        committee: Option<usize>,
    ) -> Option<usize> {
        let old = self.working_solution.committee_assignments()[assignment].committee();
        let scope = Scope::for_committee_change(&self.working_solution, assignment, old, committee);
        self.apply(&scope, |solution| {
            solution.set_committee(assignment, committee);
        });
        old
    }

    /// Moves `committee` to `time_slot` and returns its previous time slot.
    pub fn change_time_slot(
        &mut self,
        committee: usize,
        time_slot: Option<usize>,
    ) -> Option<usize> {
        let old = self.working_solution.committees()[committee].time_slot();
        let scope = Scope::for_time_slot_change(committee, old, time_slot);
        self.apply(&scope, |solution| {
            solution.set_time_slot(committee, time_slot);
        });
        old
    }

    fn apply(&mut self, scope: &Scope, change: impl FnOnce(&mut CommitteeSolution)) {
        if !self.initialized {
            change(&mut self.working_solution);
            return;
        }
        let before = evaluate_all(&self.constraints, &self.working_solution, scope);
        change(&mut self.working_solution);
        let after = evaluate_all(&self.constraints, &self.working_solution, scope);
        self.cached_score += after - before;
    }

    /// Explains the current score constraint by constraint.
    pub fn explain(&self) -> ScoreExplanation<HardMediumSoftScore> {
        explain(&self.working_solution, &self.constraints)
    }

    /// Clones the working solution with its current score.
    pub fn clone_working_solution(&mut self) -> CommitteeSolution {
        let score = self.score();
        let mut solution = self.working_solution.clone();
        solution.score = Some(score);
        solution
    }

    /// Consumes the director and returns the working solution with its score.
    pub fn take_solution(mut self) -> CommitteeSolution {
        let score = self.score();
        self.working_solution.score = Some(score);
        self.working_solution
    }
}

impl std::fmt::Debug for CommitteeScoreDirector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitteeScoreDirector")
            .field("initialized", &self.initialized)
            .field("cached_score", &self.cached_score)
            .field("constraint_count", &self.constraints.len())
            .finish()
    }
}

fn explain(
    solution: &CommitteeSolution,
    constraints: &[Constraint],
) -> ScoreExplanation<HardMediumSoftScore> {
    ScoreExplanation::new(constraints.iter().map(|c| c.analyze(solution)).collect())
}

/// Scores `solution` from scratch and stores the score and its explanation
/// text on it.
pub fn update_score(solution: &mut CommitteeSolution) -> ScoreExplanation<HardMediumSoftScore> {
    let explanation = explain(solution, &committee_constraints());
    solution.score = Some(explanation.score);
    solution.score_explanation = Some(explanation.to_string());
    debug!(
        event = "score_updated",
        id = %solution.id,
        score = %explanation.score,
        matches = explanation.total_match_count(),
    );
    explanation
}
