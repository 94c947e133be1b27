//! Error types for the pitlink simulator.
//!
//! The simulation itself never fails: unknown priorities, empty path lists
//! and zero-count batches are normalized rather than rejected. Errors only
//! exist at the configuration boundary, where text (CLI flags, preset names,
//! scenario files) is turned into typed configuration.

use thiserror::Error;

/// Top-level error type for configuration parsing and loading.
#[derive(Debug, Error)]
pub enum Error {
    /// A priority name that is not one of the known classes
    #[error("unknown priority class {0:?} (expected P0, P1 or P2)")]
    UnknownPriority(String),

    /// A scenario preset name that does not exist
    #[error("unknown scenario {name:?} (available: {available})")]
    UnknownScenario { name: String, available: String },

    /// A batch spec that is not of the form `<priority>:<count>`
    #[error("invalid batch {spec:?}: {reason}")]
    InvalidBatch { spec: String, reason: String },

    /// Scenario JSON could not be parsed
    #[error("scenario JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
