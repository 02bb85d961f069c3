//! Velocity-free discrete particle.
//!
//! A position is a set of `num_facilities` distinct open sites, stored as a
//! vector so that each slot is one dimension. Movement follows the
//! set-based discrete PSO scheme: per dimension, a random perturbation
//! (inertia), a pull toward the personal best (cognitive) and a pull toward
//! the global best (social) are applied in turn, each with its own
//! probability.
//!
//! # References
//!
//! - Kennedy & Eberhart (1997), "A Discrete Binary Version of the Particle
//!   Swarm Algorithm"
//! - Pan, Tasgetiren & Liang (2008), "A Discrete Particle Swarm Optimization
//!   Algorithm for the No-Wait Flowshop Scheduling Problem"

use super::comparator::Comparator;
use crate::error::PsoError;
use crate::problem::ProblemData;
use rand::Rng;
use serde::Serialize;

/// Coefficients in effect for one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub inertia: f64,
    pub cognitive: f64,
    pub social: f64,
}

impl Coefficients {
    /// Scales the three weights down to probabilities when they sum past 1.
    pub fn normalized(self) -> Self {
        let total = self.inertia + self.cognitive + self.social;
        if total <= 1.0 {
            return self;
        }
        Self {
            inertia: self.inertia / total,
            cognitive: self.cognitive / total,
            social: self.social / total,
        }
    }
}

/// One candidate solution of the swarm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    position: Vec<usize>,
    fitness: f64,
    best_position: Vec<usize>,
    best_fitness: f64,
}

impl Particle {
    /// Creates a particle at a uniformly random set of distinct sites.
    pub fn new<R: Rng + ?Sized>(problem: &ProblemData, rng: &mut R) -> Self {
        let position =
            rand::seq::index::sample(rng, problem.num_sites(), problem.num_facilities()).into_vec();
        Self::evaluated(problem, position)
    }

    /// Creates a particle at a given position.
    ///
    /// # Errors
    ///
    /// [`PsoError::InvalidProblem`] if the position does not open exactly
    /// `num_facilities` distinct, in-range sites.
    pub fn with_position(problem: &ProblemData, position: Vec<usize>) -> Result<Self, PsoError> {
        problem.check_facilities(&position)?;
        Ok(Self::evaluated(problem, position))
    }

    fn evaluated(problem: &ProblemData, position: Vec<usize>) -> Self {
        let fitness = problem.objective_unchecked(&position);
        Self {
            best_position: position.clone(),
            best_fitness: fitness,
            position,
            fitness,
        }
    }

    pub fn position(&self) -> &[usize] {
        &self.position
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Best position this particle has visited.
    pub fn best_position(&self) -> &[usize] {
        &self.best_position
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// Recomputes the customer assignment of the current position.
    pub fn customer_assignments(&self, problem: &ProblemData) -> Vec<usize> {
        problem.assign_unchecked(&self.position)
    }

    /// Moves the particle and re-evaluates it.
    ///
    /// Each dimension in turn:
    /// 1. with probability `inertia`, jumps to a random site not yet open;
    /// 2. with probability `cognitive`, takes the personal best's site;
    /// 3. with probability `social`, takes `global_best`'s site.
    ///
    /// A site already open in another dimension is never adopted twice, so
    /// the position stays a set. The personal best is refreshed through
    /// `comparator`.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        global_best: &Particle,
        coefficients: Coefficients,
        problem: &ProblemData,
        comparator: &Comparator,
        rng: &mut R,
    ) {
        let Coefficients {
            inertia,
            cognitive,
            social,
        } = coefficients.normalized();
        let num_sites = problem.num_sites();

        for dim in 0..self.position.len() {
            if rng.random::<f64>() < inertia {
                if let Some(site) = self.random_closed_site(num_sites, rng) {
                    self.position[dim] = site;
                }
            }
            if rng.random::<f64>() < cognitive {
                let site = self.best_position[dim];
                self.adopt(dim, site);
            }
            if rng.random::<f64>() < social {
                if let Some(&site) = global_best.position.get(dim) {
                    self.adopt(dim, site);
                }
            }
        }

        self.fitness = problem.objective_unchecked(&self.position);
        if comparator.prefers(self.fitness, self.best_fitness) {
            self.best_fitness = self.fitness;
            self.best_position.clone_from(&self.position);
        }
    }

    fn adopt(&mut self, dim: usize, site: usize) {
        if !self.position.contains(&site) {
            self.position[dim] = site;
        }
    }

    /// A uniformly random site outside the current position, if any is left.
    fn random_closed_site<R: Rng + ?Sized>(&self, num_sites: usize, rng: &mut R) -> Option<usize> {
        let closed = num_sites - self.position.len();
        if closed == 0 {
            return None;
        }
        // k-th closed site in index order
        let mut k = rng.random_range(0..closed);
        for site in 0..num_sites {
            if self.position.contains(&site) {
                continue;
            }
            if k == 0 {
                return Some(site);
            }
            k -= 1;
        }
        None
    }
}
