//! Swarm lifecycle and extremal selection.

use super::comparator::Comparator;
use super::particle::{Coefficients, Particle};
use crate::error::PsoError;
use crate::problem::ProblemData;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Ordered collection of particles for one run.
#[derive(Debug, Clone, Default)]
pub struct Swarm {
    particles: Vec<Particle>,
}

impl Swarm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any existing particles with `swarm_size` fresh random ones.
    pub fn init<R: Rng + ?Sized>(&mut self, problem: &ProblemData, swarm_size: usize, rng: &mut R) {
        self.particles.clear();
        self.particles.reserve(swarm_size);
        for _ in 0..swarm_size {
            self.particles.push(Particle::new(problem, rng));
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Returns a copy of the best particle under `comparator`.
    ///
    /// Linear scan with strict preference, so the first of several equally
    /// good particles wins.
    ///
    /// # Errors
    ///
    /// [`PsoError::EmptySwarm`] if there are no particles.
    pub fn select_best(&self, comparator: &Comparator) -> Result<Particle, PsoError> {
        self.select_by(|a, b| comparator.prefers(a, b))
    }

    /// Returns a copy of the worst particle under `comparator`.
    ///
    /// # Errors
    ///
    /// [`PsoError::EmptySwarm`] if there are no particles.
    pub fn select_worst(&self, comparator: &Comparator) -> Result<Particle, PsoError> {
        self.select_by(|a, b| comparator.prefers(b, a))
    }

    fn select_by(&self, better: impl Fn(f64, f64) -> bool) -> Result<Particle, PsoError> {
        let mut iter = self.particles.iter();
        let mut chosen = iter.next().ok_or(PsoError::EmptySwarm)?;
        for particle in iter {
            if better(particle.fitness(), chosen.fitness()) {
                chosen = particle;
            }
        }
        Ok(chosen.clone())
    }

    /// Moves every particle against the same `global_best` snapshot.
    ///
    /// Each particle draws from its own generator, seeded from `rng` in swarm
    /// order, so the parallel and sequential paths produce the same swarm.
    /// Returns once every particle has been updated.
    pub fn update_all<R: Rng + ?Sized>(
        &mut self,
        global_best: &Particle,
        coefficients: Coefficients,
        problem: &ProblemData,
        comparator: &Comparator,
        rng: &mut R,
        parallel: bool,
    ) {
        let seeds: Vec<u64> = (0..self.particles.len()).map(|_| rng.random()).collect();

        #[cfg(feature = "parallel")]
        {
            if parallel {
                self.particles
                    .par_iter_mut()
                    .zip(seeds.par_iter())
                    .for_each(|(particle, &seed)| {
                        let mut local = ChaCha8Rng::seed_from_u64(seed);
                        particle.update(global_best, coefficients, problem, comparator, &mut local);
                    });
                return;
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        for (particle, seed) in self.particles.iter_mut().zip(seeds) {
            let mut local = ChaCha8Rng::seed_from_u64(seed);
            particle.update(global_best, coefficients, problem, comparator, &mut local);
        }
    }
}
