//! Background solver service for committee scheduling.
//!
//! Solving runs on a blocking task. Every improved solution is written to the
//! session store so `GET` requests observe progress while the job runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use committee_core::{CommitteeSolution, HardMediumSoftScore, Score, SolverStatus};
use committee_scoring::CommitteeScoreDirector;
use parking_lot::RwLock;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SolverConfig;
use crate::store::SessionStore;

/// Callback receiving every new best solution.
pub type BestSolutionListener<'a> = dyn FnMut(&CommitteeSolution) + 'a;

/// Search strategy driving a score director.
///
/// Implementations change the working solution only through
/// [`CommitteeScoreDirector::change_committee`] and
/// [`CommitteeScoreDirector::change_time_slot`], report each new best solution
/// to `on_best`, and return the best solution found once `terminate` is raised
/// or their own limit is reached.
pub trait Optimizer: Send + Sync {
    fn optimize(
        &self,
        director: CommitteeScoreDirector,
        terminate: &AtomicBool,
        on_best: &mut BestSolutionListener<'_>,
    ) -> CommitteeSolution;
}

/// Late acceptance local search over single-variable changes.
#[derive(Debug, Clone)]
pub struct LateAcceptanceOptimizer {
    pub time_limit: Duration,
    pub late_acceptance_size: usize,
    pub random_seed: Option<u64>,
}

impl LateAcceptanceOptimizer {
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            time_limit: config.time_limit(),
            late_acceptance_size: config.late_acceptance_size.max(1),
            random_seed: config.random_seed,
        }
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.random_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }
}

/// A random change of one decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Committee { assignment: usize, value: Option<usize> },
    TimeSlot { committee: usize, value: Option<usize> },
}

impl Change {
    fn apply(self, director: &mut CommitteeScoreDirector) -> Change {
        match self {
            Change::Committee { assignment, value } => Change::Committee {
                assignment,
                value: director.change_committee(assignment, value),
            },
            Change::TimeSlot { committee, value } => Change::TimeSlot {
                committee,
                value: director.change_time_slot(committee, value),
            },
        }
    }
}

/// Picks a value in `0..count`, or unset with probability `1 / (count + 1)`.
fn random_value(rng: &mut impl Rng, count: usize) -> Option<usize> {
    let pick = rng.random_range(0..=count);
    (pick < count).then_some(pick)
}

fn random_change(
    rng: &mut impl Rng,
    director: &CommitteeScoreDirector,
    assignment_count: usize,
    committee_count: usize,
    slot_count: usize,
) -> Option<Change> {
    let solution = director.working_solution();
    let can_assign = assignment_count > 0;
    let can_schedule = committee_count > 0 && slot_count > 0;

    let change = if can_assign && (!can_schedule || rng.random_bool(0.75)) {
        let assignment = rng.random_range(0..assignment_count);
        let value = random_value(rng, committee_count);
        if solution.committee_assignments()[assignment].committee() == value {
            return None;
        }
        Change::Committee { assignment, value }
    } else {
        let committee = rng.random_range(0..committee_count);
        let value = random_value(rng, slot_count);
        if solution.committees()[committee].time_slot() == value {
            return None;
        }
        Change::TimeSlot { committee, value }
    };
    Some(change)
}

impl Optimizer for LateAcceptanceOptimizer {
    fn optimize(
        &self,
        mut director: CommitteeScoreDirector,
        terminate: &AtomicBool,
        on_best: &mut BestSolutionListener<'_>,
    ) -> CommitteeSolution {
        let solve_start = Instant::now();
        let mut rng = self.rng();

        let solution = director.working_solution();
        let committee_count = solution.committees().len();
        let assignment_count = if committee_count > 0 {
            solution.committee_assignments().len()
        } else {
            0
        };
        let slot_count = solution.time_slots().len();

        let mut current_score = director.calculate_score();
        let mut best_score = current_score;
        let mut best = director.clone_working_solution();
        on_best(&best);

        if assignment_count == 0 && (committee_count == 0 || slot_count == 0) {
            return best;
        }

        let mut late_scores: Vec<HardMediumSoftScore> =
            vec![current_score; self.late_acceptance_size];
        let mut step: u64 = 0;
        let mut moves_evaluated: u64 = 0;

        while solve_start.elapsed() < self.time_limit
            && best_score < HardMediumSoftScore::ZERO
            && !terminate.load(Ordering::Relaxed)
        {
            let Some(change) = random_change(
                &mut rng,
                &director,
                assignment_count,
                committee_count,
                slot_count,
            ) else {
                continue;
            };
            let undo = change.apply(&mut director);
            let new_score = director.get_score();
            moves_evaluated += 1;

            let late_idx = (step as usize) % self.late_acceptance_size;
            if new_score >= current_score || new_score >= late_scores[late_idx] {
                current_score = new_score;
                late_scores[late_idx] = new_score;

                if new_score.is_better_than(&best_score) {
                    best_score = new_score;
                    best = director.clone_working_solution();
                    debug!(event = "new_best", step, score = %best_score);
                    on_best(&best);
                }
            } else {
                undo.apply(&mut director);
            }
            step += 1;
        }

        info!(
            event = "optimize_end",
            steps = step,
            moves_evaluated,
            duration_ms = solve_start.elapsed().as_millis() as u64,
            score = %best_score,
            feasible = best_score.is_feasible(),
            terminated_early = terminate.load(Ordering::Relaxed),
        );
        best
    }
}

struct SolveJob {
    terminate: AtomicBool,
}

type JobTable = Arc<RwLock<HashMap<Uuid, Arc<SolveJob>>>>;

/// Drops the job from the table when the solving task ends, even by panic.
struct JobGuard {
    jobs: JobTable,
    id: Uuid,
}

impl Drop for JobGuard {
    fn drop(&mut self) {
        self.jobs.write().remove(&self.id);
    }
}

/// Runs optimizers in the background and tracks their status.
pub struct SolverService {
    jobs: JobTable,
    store: Arc<SessionStore<CommitteeSolution>>,
    optimizer: Arc<dyn Optimizer>,
}

impl SolverService {
    pub fn new(store: Arc<SessionStore<CommitteeSolution>>, optimizer: Arc<dyn Optimizer>) -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            store,
            optimizer,
        }
    }

    /// Creates a service running [`LateAcceptanceOptimizer`].
    pub fn with_config(store: Arc<SessionStore<CommitteeSolution>>, config: &SolverConfig) -> Self {
        Self::new(store, Arc::new(LateAcceptanceOptimizer::new(config)))
    }

    pub fn store(&self) -> &Arc<SessionStore<CommitteeSolution>> {
        &self.store
    }

    /// Stores `solution` under `id` and starts solving it in the background.
    ///
    /// Every best solution found replaces the stored one, as long as the
    /// store still holds the session. Must be called within a Tokio runtime.
    pub fn solve_and_listen(&self, id: Uuid, solution: CommitteeSolution) -> JoinHandle<()> {
        self.store.put(id, solution.clone());

        let job = Arc::new(SolveJob {
            terminate: AtomicBool::new(false),
        });
        self.jobs.write().insert(id, Arc::clone(&job));

        let guard = JobGuard {
            jobs: Arc::clone(&self.jobs),
            id,
        };
        let store = Arc::clone(&self.store);
        let optimizer = Arc::clone(&self.optimizer);

        info!(
            event = "solve_start",
            id = %id,
            committees = solution.committees().len(),
            assignments = solution.committee_assignments().len(),
            time_slots = solution.time_slots().len(),
        );

        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let director = CommitteeScoreDirector::new(solution);
            let best = optimizer.optimize(director, &job.terminate, &mut |best| {
                store.replace(id, best.clone());
            });
            if !store.replace(id, best.clone()) {
                debug!(event = "session_gone", id = %id);
            }

            info!(
                event = "solve_end",
                id = %id,
                score = %best.score.unwrap_or_default(),
            );
        })
    }

    pub fn solver_status(&self, id: &Uuid) -> SolverStatus {
        if self.jobs.read().contains_key(id) {
            SolverStatus::Solving
        } else {
            SolverStatus::NotSolving
        }
    }

    /// Asks the job solving `id` to stop. Unknown or finished ids are ignored.
    pub fn terminate_early(&self, id: &Uuid) -> bool {
        match self.jobs.read().get(id) {
            Some(job) => {
                job.terminate.store(true, Ordering::Relaxed);
                info!(event = "terminate_early", id = %id);
                true
            }
            None => false,
        }
    }

    pub fn active_job_count(&self) -> usize {
        self.jobs.read().len()
    }
}
