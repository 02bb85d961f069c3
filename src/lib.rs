//! Discrete particle swarm optimization for facility location.
//!
//! Provides:
//!
//! - **Problem model**: customer × site cost matrices with median, center
//!   and capacitated-median variants, minimized or maximized.
//! - **Discrete PSO**: a velocity-free swarm over sets of open sites with
//!   geometric inertia decay and a single configurable comparator.
//! - **Coefficient sweep**: a reproducible grid search over inertia,
//!   cognitive and social weights, with multiple trials per grid point.
//!
//! Progress and results are reported through the [`pso::Listener`] trait;
//! the crate itself only emits `tracing` events and never installs a
//! subscriber.
//!
//! # Example
//!
//! ```
//! use u_swarm::problem::{ObjectiveType, ProblemData, ProblemType};
//! use u_swarm::pso::{PsoConfig, PsoRunner};
//!
//! let costs = vec![
//!     vec![0.0, 4.0, 8.0, 9.0],
//!     vec![4.0, 0.0, 5.0, 7.0],
//!     vec![8.0, 5.0, 0.0, 2.0],
//!     vec![9.0, 7.0, 2.0, 0.0],
//! ];
//! let problem =
//!     ProblemData::new("demo", costs, 2, ProblemType::Median, ObjectiveType::Minimize).unwrap();
//! let config = PsoConfig::default().with_swarm_size(10).with_max_iterations(50).with_seed(42);
//!
//! let results = PsoRunner::run(&problem, &config).unwrap();
//! assert_eq!(results.customer_assignments.len(), 4);
//! ```

pub mod error;
pub mod problem;
pub mod pso;
pub mod sweep;

pub use error::{ListenerError, PsoError};
