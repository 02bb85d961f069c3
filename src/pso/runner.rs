//! PSO execution loop.
//!
//! # Algorithm
//!
//! 1. Initialize a fresh swarm, take its best particle as both the
//!    iteration best (`gBest`) and the all-time best (`uBest`)
//! 2. For exactly `max_iterations` iterations:
//!    a. Discount the inertia
//!    b. Move every particle against the same `gBest` snapshot
//!    c. Recompute `gBest` over the moved swarm
//!    d. Replace `uBest` with a copy of `gBest` if it is preferred
//!    e. Notify the listener with `uBest`
//! 3. Recompute the customer assignment of `uBest` and return the results
//!
//! There is no convergence-based early exit, so runs with the same
//! iteration budget stay comparable.

use super::comparator::Comparator;
use super::config::PsoConfig;
use super::listener::{log_failure, Listener, NoopListener};
use super::particle::Coefficients;
use super::swarm::Swarm;
use crate::error::PsoError;
use crate::problem::{ObjectiveType, ProblemData, ProblemType};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

/// Result of one PSO run.
///
/// Self-describing: carries the problem variant and direction it was
/// produced under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemResults {
    /// Wall-clock seconds spent in the iteration loop.
    pub elapsed_secs: f64,

    /// Fitness of the all-time best particle.
    pub fitness: f64,

    /// Open sites of the all-time best particle.
    pub position: Vec<usize>,

    /// Facility slot (index into `position`) serving each customer,
    /// recomputed from `position` after the run.
    pub customer_assignments: Vec<usize>,

    pub problem_type: ProblemType,

    pub objective_type: ObjectiveType,

    /// Iterations executed (always the configured `max_iterations`).
    pub iterations: usize,

    /// All-time best fitness after initialization and after every iteration.
    pub fitness_history: Vec<f64>,

    /// Inertia in effect during the last iteration.
    pub final_inertia: f64,
}

/// Executes the discrete PSO.
pub struct PsoRunner;

impl PsoRunner {
    /// Runs PSO without notifications.
    pub fn run(problem: &ProblemData, config: &PsoConfig) -> Result<ProblemResults, PsoError> {
        Self::run_with_listener(problem, config, &NoopListener)
    }

    /// Runs PSO, reporting the all-time best to `listener` after every
    /// iteration.
    ///
    /// Inertia always starts from `config.inertia`, so repeated calls with
    /// one configuration never inherit a decayed value.
    ///
    /// # Errors
    ///
    /// [`PsoError::InvalidConfig`] if `config` fails validation. Listener
    /// failures are logged and never returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_swarm::problem::{ObjectiveType, ProblemData, ProblemType};
    /// use u_swarm::pso::{PsoConfig, PsoRunner};
    ///
    /// let costs = vec![
    ///     vec![0.0, 3.0, 7.0],
    ///     vec![3.0, 0.0, 4.0],
    ///     vec![7.0, 4.0, 0.0],
    /// ];
    /// let problem =
    ///     ProblemData::new("line", costs, 1, ProblemType::Median, ObjectiveType::Minimize).unwrap();
    /// let config = PsoConfig::default().with_swarm_size(5).with_max_iterations(20).with_seed(1);
    ///
    /// let results = PsoRunner::run(&problem, &config).unwrap();
    /// assert_eq!(results.position, vec![1]);
    /// assert!((results.fitness - 7.0).abs() < 1e-12);
    /// ```
    pub fn run_with_listener<L: Listener + ?Sized>(
        problem: &ProblemData,
        config: &PsoConfig,
        listener: &L,
    ) -> Result<ProblemResults, PsoError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };

        // Setup
        let comparator = Comparator::new(problem.objective_type());
        let mut swarm = Swarm::new();
        swarm.init(problem, config.swarm_size, &mut rng);
        let mut g_best = swarm.select_best(&comparator)?;
        let mut u_best = g_best.clone();

        debug!(
            problem = problem.name(),
            swarm_size = config.swarm_size,
            max_iterations = config.max_iterations,
            initial_fitness = u_best.fitness(),
            "pso run started"
        );

        let start = Instant::now();
        let mut fitness_history = Vec::with_capacity(config.max_iterations + 1);
        fitness_history.push(u_best.fitness());

        for count in 1..=config.max_iterations {
            // Decayed before the move: iteration 1 already uses one discount.
            let inertia = config.inertia_after(count);
            let coefficients = Coefficients {
                inertia,
                cognitive: config.cognitive,
                social: config.social,
            };

            swarm.update_all(
                &g_best,
                coefficients,
                problem,
                &comparator,
                &mut rng,
                config.parallel,
            );

            g_best = swarm.select_best(&comparator)?;
            if comparator.prefers(g_best.fitness(), u_best.fitness()) {
                u_best = g_best.clone();
            }
            fitness_history.push(u_best.fitness());

            trace!(iteration = count, inertia, best = u_best.fitness(), "iteration");
            log_failure("particle", listener.handle_particle(&u_best, count));
        }

        let elapsed_secs = start.elapsed().as_secs_f64();
        let customer_assignments = u_best.customer_assignments(problem);

        debug!(
            problem = problem.name(),
            fitness = u_best.fitness(),
            elapsed_secs,
            "pso run finished"
        );

        Ok(ProblemResults {
            elapsed_secs,
            fitness: u_best.fitness(),
            position: u_best.position().to_vec(),
            customer_assignments,
            problem_type: problem.problem_type(),
            objective_type: problem.objective_type(),
            iterations: config.max_iterations,
            fitness_history,
            final_inertia: config.inertia_after(config.max_iterations),
        })
    }
}
