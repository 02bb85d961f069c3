//! PSO configuration.

use crate::error::PsoError;
use serde::{Deserialize, Serialize};

/// Configuration for one discrete PSO run.
///
/// A run never mutates its configuration: the decaying inertia lives in the
/// runner, starting from [`inertia`](Self::inertia) on every call.
///
/// # Examples
///
/// ```
/// use u_swarm::pso::PsoConfig;
///
/// let config = PsoConfig::default()
///     .with_swarm_size(20)
///     .with_max_iterations(200)
///     .with_inertia(0.7)
///     .with_inertial_discount(0.98)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsoConfig {
    /// Weight of the pull toward the swarm's best particle.
    pub social: f64,

    /// Weight of the pull toward a particle's own best position.
    pub cognitive: f64,

    /// Initial inertia: weight of random exploration.
    pub inertia: f64,

    /// Multiplied into the inertia at the start of every iteration.
    pub inertial_discount: f64,

    /// Number of particles.
    pub swarm_size: usize,

    /// Number of iterations. Always run in full; 0 returns the best
    /// particle of the initial swarm.
    pub max_iterations: usize,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Update particles in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature. Results are identical
    /// to the sequential update for the same seed.
    pub parallel: bool,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            social: 0.5,
            cognitive: 0.5,
            inertia: 0.9,
            inertial_discount: 0.99,
            swarm_size: 30,
            max_iterations: 100,
            seed: None,
            parallel: false,
        }
    }
}

/// Parameter record written by [`PsoConfig::json_parameters`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonParameters {
    inertia: f64,
    cognitive: f64,
    social: f64,
    inertial_discount: f64,
    swarm_size: usize,
    max_iterations: usize,
}

impl PsoConfig {
    pub fn with_social(mut self, social: f64) -> Self {
        self.social = social;
        self
    }

    pub fn with_cognitive(mut self, cognitive: f64) -> Self {
        self.cognitive = cognitive;
        self
    }

    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }

    pub fn with_inertial_discount(mut self, discount: f64) -> Self {
        self.inertial_discount = discount;
        self
    }

    pub fn with_swarm_size(mut self, n: usize) -> Self {
        self.swarm_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Inertia used by iteration `k` (1-based): `inertia * discount^k`.
    ///
    /// `k = 0` is the undiscounted starting value.
    pub fn inertia_after(&self, k: usize) -> f64 {
        if k == 0 {
            return self.inertia;
        }
        self.inertia * self.inertial_discount.powf(k as f64)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), PsoError> {
        if self.swarm_size == 0 {
            return Err(PsoError::InvalidConfig("swarm_size must be positive".into()));
        }
        for (name, value) in [
            ("social", self.social),
            ("cognitive", self.cognitive),
            ("inertia", self.inertia),
            ("inertial_discount", self.inertial_discount),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PsoError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.inertial_discount > 1.0 {
            return Err(PsoError::InvalidConfig(format!(
                "inertial_discount must be in [0, 1], got {}",
                self.inertial_discount
            )));
        }
        Ok(())
    }

    /// Serializes the tunable parameters for logging and reproducibility.
    ///
    /// Fields, in order: `inertia` (the initial value), `cognitive`,
    /// `social`, `inertialDiscount`, `swarmSize`, `maxIterations`.
    pub fn json_parameters(&self) -> Result<String, PsoError> {
        let params = JsonParameters {
            inertia: self.inertia,
            cognitive: self.cognitive,
            social: self.social,
            inertial_discount: self.inertial_discount,
            swarm_size: self.swarm_size,
            max_iterations: self.max_iterations,
        };
        Ok(serde_json::to_string(&params)?)
    }
}
