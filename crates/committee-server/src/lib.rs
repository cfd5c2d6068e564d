//! Committee scheduling REST service.
//!
//! - `config`: TOML/YAML service configuration
//! - `store`: bounded, expiring session store of solutions
//! - `solver`: background solver service and the default optimizer
//! - `api`: axum router under `/api/committeeSolution`

pub mod api;
pub mod config;
pub mod error;
pub mod solver;
pub mod store;

pub use api::{router, AppState};
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use solver::{LateAcceptanceOptimizer, Optimizer, SolverService};
pub use store::SessionStore;
