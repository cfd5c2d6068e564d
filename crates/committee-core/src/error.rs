//! Error types for the committee domain.

use thiserror::Error;

/// Main error type for building and querying committee problems.
#[derive(Debug, Error)]
pub enum CommitteeError {
    /// Two participants in the roster share a name.
    #[error("All persons must have a unique name (duplicated: {0})")]
    DuplicatePersonName(String),

    /// A settings range is negative or has its bounds swapped.
    #[error("Invalid range for {field}: [{min}, {max}]")]
    InvalidRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// A participant asks for more assignment slots than the problem can use.
    #[error("{person} asks for {requested} assignments, at most {limit} allowed")]
    TooManyAssignments {
        person: String,
        requested: i64,
        limit: usize,
    },

    /// A lookup by name or index did not match anything in the solution.
    #[error("Unknown {kind}: {key}")]
    UnknownEntity { kind: &'static str, key: String },

    /// The problem payload could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for committee operations.
pub type Result<T> = std::result::Result<T, CommitteeError>;
