//! Error types shared by the engine, the problem model and the sweep driver.

use thiserror::Error;

/// Errors raised by problem construction, configuration and optimization.
#[derive(Debug, Error)]
pub enum PsoError {
    /// An objective direction tag that is neither minimize nor maximize.
    #[error("unsupported objective type: {0}")]
    UnsupportedObjective(String),

    /// A problem variant tag that is not one of the known problem types.
    #[error("unsupported problem type: {0}")]
    UnsupportedProblemType(String),

    /// Invalid optimizer or sweep parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed problem data (cost matrix shape, facility count, capacity).
    #[error("invalid problem: {0}")]
    InvalidProblem(String),

    /// Best/worst selection was attempted on a swarm with no particles.
    #[error("swarm is empty")]
    EmptySwarm,

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// Failure reported by a [`Listener`](crate::pso::Listener) callback.
///
/// The engine logs these and carries on; they never abort a run.
#[derive(Debug, Error)]
#[error("listener failed: {message}")]
pub struct ListenerError {
    pub message: String,
}

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
