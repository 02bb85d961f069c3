//! Discrete Particle Swarm Optimization (PSO).
//!
//! A velocity-free PSO over sets of open facility sites. Each iteration
//! moves every particle against the same global-best snapshot, then
//! refreshes the global best and the all-time best. Inertia decays
//! geometrically from its configured value on every run.
//!
//! # Key Types
//!
//! - [`PsoConfig`]: Coefficients, swarm size, iteration budget, seed
//! - [`PsoRunner`]: Executes one run and returns [`ProblemResults`]
//! - [`Comparator`]: Single source of the minimize/maximize ordering
//! - [`Swarm`] / [`Particle`]: Population and move operator
//! - [`Listener`]: Per-iteration and per-run notifications
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod comparator;
mod config;
mod listener;
mod particle;
mod runner;
mod swarm;

pub use comparator::Comparator;
pub use config::PsoConfig;
pub use listener::{Listener, NoopListener, TracingListener};
pub use particle::{Coefficients, Particle};
pub use runner::{ProblemResults, PsoRunner};
pub use swarm::Swarm;

pub(crate) use listener::log_failure;
