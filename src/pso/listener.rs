//! Progress and result notifications.

use super::config::PsoConfig;
use super::particle::Particle;
use super::runner::ProblemResults;
use crate::error::ListenerError;
use crate::problem::{ObjectiveType, ProblemType};
use tracing::{info, trace, warn};

/// Receives notifications from the optimizer and the sweep driver.
///
/// Notifications are fire-and-forget: the engine does not retry, and an
/// `Err` is logged and otherwise ignored. All methods default to no-ops.
///
/// Listeners must be `Send + Sync` because parallel sweeps share one
/// listener across worker threads; use interior mutability to record.
pub trait Listener: Send + Sync {
    /// Called before a run with the configuration about to be used.
    fn handle_algorithm(
        &self,
        _config: &PsoConfig,
        _problem_name: &str,
        _problem_type: ProblemType,
        _objective_type: ObjectiveType,
    ) -> Result<(), ListenerError> {
        Ok(())
    }

    /// Called after every iteration with the all-time best particle.
    fn handle_particle(&self, _best: &Particle, _iteration: usize) -> Result<(), ListenerError> {
        Ok(())
    }

    /// Called after a run with its results.
    fn handle_results(&self, _results: &ProblemResults) -> Result<(), ListenerError> {
        Ok(())
    }
}

/// Listener that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl Listener for NoopListener {}

/// Listener that forwards every notification to `tracing`.
///
/// Runs are logged at `info`, iterations at `trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl Listener for TracingListener {
    fn handle_algorithm(
        &self,
        config: &PsoConfig,
        problem_name: &str,
        problem_type: ProblemType,
        objective_type: ObjectiveType,
    ) -> Result<(), ListenerError> {
        let parameters = config
            .json_parameters()
            .map_err(|e| ListenerError::new(e.to_string()))?;
        info!(
            problem = problem_name,
            problem_type = %problem_type,
            objective = %objective_type,
            parameters = parameters.as_str(),
            "starting run"
        );
        Ok(())
    }

    fn handle_particle(&self, best: &Particle, iteration: usize) -> Result<(), ListenerError> {
        trace!(iteration, fitness = best.fitness(), position = ?best.position(), "iteration best");
        Ok(())
    }

    fn handle_results(&self, results: &ProblemResults) -> Result<(), ListenerError> {
        info!(
            fitness = results.fitness,
            elapsed_secs = results.elapsed_secs,
            iterations = results.iterations,
            position = ?results.position,
            "run finished"
        );
        Ok(())
    }
}

/// Logs a failed notification without propagating it.
pub(crate) fn log_failure(event: &'static str, outcome: Result<(), ListenerError>) {
    if let Err(e) = outcome {
        warn!(event, error = %e, "listener notification failed");
    }
}
