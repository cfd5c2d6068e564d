//! REST API for committee scheduling.
//!
//! Base path `/api/committeeSolution`:
//! - `POST /solve`: build a problem from `{settings, participants}` and start
//!   solving it
//! - `GET /{id}`: the stored solution, rescored and explained
//! - `GET /stopSolving/{id}`: ask the solver to stop

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use committee_core::{CommitteeSolution, SolverOptions};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};
use crate::solver::SolverService;
use crate::store::SessionStore;

/// Base path of every route.
pub const BASE_PATH: &str = "/api/committeeSolution";

/// Shared application state.
pub struct AppState {
    pub solver: SolverService,
    /// Seeded generator for roster shuffles, when a seed is configured.
    shuffle_rng: Option<Mutex<ChaCha8Rng>>,
}

impl AppState {
    pub fn new(solver: SolverService, random_seed: Option<u64>) -> Self {
        Self {
            solver,
            shuffle_rng: random_seed.map(|seed| Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let store = Arc::new(SessionStore::from_config(&config.store));
        let solver = SolverService::with_config(store, &config.solver);
        Self::new(solver, config.solver.random_seed)
    }

    fn build(&self, id: Uuid, options: SolverOptions) -> ApiResult<CommitteeSolution> {
        let solution = match &self.shuffle_rng {
            Some(rng) => {
                CommitteeSolution::build_with_rng(id.to_string(), options, &mut *rng.lock())?
            }
            None => CommitteeSolution::new(id.to_string(), options)?,
        };
        Ok(solution)
    }
}

/// Creates the API router.
pub fn router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/solve", post(solve))
        .route("/stopSolving/{id}", get(stop_solving))
        .route("/{id}", get(get_solution));

    Router::new().nest(BASE_PATH, routes).with_state(state)
}

/// POST /api/committeeSolution/solve
async fn solve(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SolverOptions>, JsonRejection>,
) -> ApiResult<Json<CommitteeSolution>> {
    let Json(options) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let id = Uuid::new_v4();
    let solution = state.build(id, options)?;

    state.solver.solve_and_listen(id, solution.clone());
    Ok(Json(solution))
}

/// GET /api/committeeSolution/{id}
async fn get_solution(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<CommitteeSolution>> {
    let uuid = Uuid::parse_str(&id).map_err(|_| ApiError::NotFound(id.clone()))?;

    let status = state.solver.solver_status(&uuid);
    let mut solution = state
        .solver
        .store()
        .get(&uuid)
        .ok_or_else(|| ApiError::NotFound(id.clone()))?;

    let explanation = committee_scoring::update_score(&mut solution);
    solution.solver_status = Some(status);
    info!(event = "solution_fetched", id = %id, status = ?status, "\n{explanation}");
    Ok(Json(solution))
}

/// GET /api/committeeSolution/stopSolving/{id}
async fn stop_solving(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> String {
    if let Ok(uuid) = Uuid::parse_str(&id) {
        state.solver.terminate_early(&uuid);
    }
    format!("The solving solution {id} has been terminated.")
}
