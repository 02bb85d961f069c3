//! Coefficient sweep.
//!
//! Exhaustive grid search over the (inertia, cognitive, social) space used
//! to tune the discrete PSO empirically. With the defaults every axis takes
//! the values `{0.1, 0.3, 0.5, 0.7, 0.9}` and each of the 125 grid points
//! runs 10 independent trials, for 1250 runs in total.
//!
//! Every trial runs on its own configuration snapshot, so no decayed inertia
//! or coefficient leaks between trials.

mod config;
mod runner;

pub use config::{SweepConfig, SweepPoint, DEFAULT_COEFFICIENTS};
pub use runner::{SweepBest, SweepReport, SweepRunner};
