//! Facility location problem model.
//!
//! A [`ProblemData`] instance holds a customer × site cost matrix, the number
//! of facilities to open, the problem variant ([`ProblemType`]) and the
//! optimization direction ([`ObjectiveType`]).
//!
//! Solutions are sets of open sites. [`AssignmentStrategy`] maps a facility
//! set to a customer assignment and [`ObjectiveStrategy`] scores it; both are
//! closed over the fixed set of problem variants.
//!
//! # References
//!
//! - Hakimi (1964), "Optimum Locations of Switching Centers and the Absolute
//!   Centers and Medians of a Graph"
//! - ReVelle & Swain (1970), "Central Facilities Location"

mod assignment;
mod data;
mod objective;
mod types;

pub use assignment::AssignmentStrategy;
pub use data::ProblemData;
pub use objective::ObjectiveStrategy;
pub use types::{ObjectiveType, ProblemType};
