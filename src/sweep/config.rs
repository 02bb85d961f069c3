//! Sweep configuration.

use crate::error::PsoError;
use crate::pso::PsoConfig;
use serde::{Deserialize, Serialize};

/// Coefficient values tried on each axis by default.
///
/// An explicit list rather than a float step, so the 0.9 boundary is always
/// visited exactly once.
pub const DEFAULT_COEFFICIENTS: [f64; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];

/// One (inertia, cognitive, social) grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub inertia: f64,
    pub cognitive: f64,
    pub social: f64,
}

impl SweepPoint {
    /// `base` with this point's coefficients.
    pub fn apply(&self, base: &PsoConfig) -> PsoConfig {
        base.clone()
            .with_inertia(self.inertia)
            .with_cognitive(self.cognitive)
            .with_social(self.social)
    }
}

/// Configuration for the coefficient grid search.
///
/// # Examples
///
/// ```
/// use u_swarm::sweep::SweepConfig;
///
/// let sweep = SweepConfig::default();
/// assert_eq!(sweep.points().count(), 125);
/// assert_eq!(sweep.total_trials(), 1250);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Values tried on each of the three axes.
    pub values: Vec<f64>,

    /// Independent runs per grid point.
    pub trials_per_point: usize,

    /// Master seed for per-trial seeds. `None` draws a fresh one.
    pub seed: Option<u64>,

    /// Run the trials of one grid point concurrently.
    ///
    /// Only takes effect with the `parallel` feature.
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            values: DEFAULT_COEFFICIENTS.to_vec(),
            trials_per_point: 10,
            seed: None,
            parallel: false,
        }
    }
}

impl SweepConfig {
    pub fn with_values(mut self, values: Vec<f64>) -> Self {
        self.values = values;
        self
    }

    pub fn with_trials_per_point(mut self, n: usize) -> Self {
        self.trials_per_point = n;
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

    /// Grid points in visiting order: inertia outermost, social innermost.
    pub fn points(&self) -> impl Iterator<Item = SweepPoint> + '_ {
        self.values.iter().flat_map(move |&inertia| {
            self.values.iter().flat_map(move |&cognitive| {
                self.values.iter().map(move |&social| SweepPoint {
                    inertia,
                    cognitive,
                    social,
                })
            })
        })
    }

    /// Total number of runs the sweep performs.
    pub fn total_trials(&self) -> usize {
        self.values.len().pow(3) * self.trials_per_point
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), PsoError> {
        if self.values.is_empty() {
            return Err(PsoError::InvalidConfig("sweep needs at least one value".into()));
        }
        if let Some(v) = self.values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(PsoError::InvalidConfig(format!(
                "sweep values must be non-negative numbers, got {v}"
            )));
        }
        for (i, v) in self.values.iter().enumerate() {
            if self.values[..i].contains(v) {
                return Err(PsoError::InvalidConfig(format!(
                    "sweep value {v} listed twice"
                )));
            }
        }
        if self.trials_per_point == 0 {
            return Err(PsoError::InvalidConfig(
                "trials_per_point must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let sweep = SweepConfig::default();
        assert_eq!(sweep.values, vec![0.1, 0.3, 0.5, 0.7, 0.9]);
        assert_eq!(sweep.trials_per_point, 10);
        assert!(sweep.validate().is_ok());
    }

    #[test]
    fn test_points_cover_grid_once() {
        let sweep = SweepConfig::default();
        let points: Vec<SweepPoint> = sweep.points().collect();
        assert_eq!(points.len(), 125);
        for (i, a) in points.iter().enumerate() {
            assert!(!points[i + 1..].contains(a), "duplicate point {a:?}");
        }
        assert!(points.iter().any(|p| p.inertia == 0.9 && p.cognitive == 0.9 && p.social == 0.9));
    }

    #[test]
    fn test_points_order() {
        let sweep = SweepConfig::default().with_values(vec![0.1, 0.2]);
        let points: Vec<(f64, f64, f64)> = sweep
            .points()
            .map(|p| (p.inertia, p.cognitive, p.social))
            .collect();
        assert_eq!(
            points,
            vec![
                (0.1, 0.1, 0.1),
                (0.1, 0.1, 0.2),
                (0.1, 0.2, 0.1),
                (0.1, 0.2, 0.2),
                (0.2, 0.1, 0.1),
                (0.2, 0.1, 0.2),
                (0.2, 0.2, 0.1),
                (0.2, 0.2, 0.2),
            ]
        );
    }

    #[test]
    fn test_apply_keeps_other_fields() {
        let base = PsoConfig::default().with_swarm_size(7).with_max_iterations(9);
        let point = SweepPoint {
            inertia: 0.3,
            cognitive: 0.5,
            social: 0.7,
        };
        let config = point.apply(&base);
        assert_eq!(config.swarm_size, 7);
        assert_eq!(config.max_iterations, 9);
        assert_eq!(config.inertia, 0.3);
        assert_eq!(config.cognitive, 0.5);
        assert_eq!(config.social, 0.7);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(SweepConfig::default().with_values(vec![]).validate().is_err());
        assert!(SweepConfig::default().with_values(vec![-0.1]).validate().is_err());
        assert!(SweepConfig::default().with_trials_per_point(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_values() {
        let sweep = SweepConfig::default().with_values(vec![0.5, 0.3, 0.5]);
        assert!(matches!(sweep.validate(), Err(PsoError::InvalidConfig(_))));
        assert!(SweepConfig::default().with_values(vec![0.3, 0.5]).validate().is_ok());
    }
}
