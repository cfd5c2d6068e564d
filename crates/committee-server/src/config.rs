//! Server configuration.
//!
//! Load the service configuration from TOML or YAML so time limits and store
//! bounds can change without a rebuild.
//!
//! ```
//! use committee_server::config::ServerConfig;
//! use std::time::Duration;
//!
//! let config = ServerConfig::from_toml_str(r#"
//!     bind_address = "127.0.0.1:9000"
//!
//!     [solver]
//!     seconds_spent_limit = 5
//!     random_seed = 42
//! "#).unwrap();
//!
//! assert_eq!(config.solver.time_limit(), Duration::from_secs(5));
//! assert_eq!(config.solver.late_acceptance_size, 400);
//! assert_eq!(config.store.capacity, 50);
//! ```
//!
//! Use the defaults when the file is missing:
//!
//! ```
//! use committee_server::config::ServerConfig;
//!
//! let config = ServerConfig::load("committee.toml").unwrap_or_default();
//! ```

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "COMMITTEE_CONFIG";

/// Configuration file used when [`CONFIG_ENV_VAR`] is not set.
pub const DEFAULT_CONFIG_PATH: &str = "committee.toml";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server listens on.
    pub bind_address: String,
    pub solver: SolverConfig,
    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            solver: SolverConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

/// Settings of the default optimizer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverConfig {
    pub seconds_spent_limit: u64,
    pub late_acceptance_size: usize,
    /// Seeds both the roster shuffle and the optimizer when set.
    pub random_seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seconds_spent_limit: 30,
            late_acceptance_size: 400,
            random_seed: None,
        }
    }
}

impl SolverConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.seconds_spent_limit)
    }
}

/// Bounds of the session store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub capacity: usize,
    pub time_to_live_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            time_to_live_seconds: 24 * 60 * 60,
        }
    }
}

impl StoreConfig {
    pub fn time_to_live(&self) -> Duration {
        Duration::from_secs(self.time_to_live_seconds)
    }
}

impl ServerConfig {
    /// Loads configuration from a file, YAML for `.yaml`/`.yml` and TOML
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, doesn't parse or holds
    /// invalid values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }

    /// Loads the file named by `COMMITTEE_CONFIG`, or `committee.toml`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("bind_address {:?}: {e}", self.bind_address)))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if self.solver.late_acceptance_size == 0 {
            return Err(ConfigError::Invalid("late_acceptance_size must be positive".to_string()));
        }
        if self.store.capacity == 0 {
            return Err(ConfigError::Invalid("store capacity must be positive".to_string()));
        }
        Ok(())
    }
}
