//! Objective aggregation over an assignment.

use super::types::ProblemType;

/// Scores a customer assignment.
///
/// `assignment[c] = k` means customer `c` is served by `facilities[k]`,
/// as produced by [`AssignmentStrategy`](super::AssignmentStrategy).
pub struct ObjectiveStrategy;

impl ObjectiveStrategy {
    /// Computes the objective value for `problem_type`.
    ///
    /// - `Median` and `CapacitatedMedian`: sum of assignment costs.
    /// - `Center`: largest single assignment cost.
    ///
    /// An empty assignment scores `0.0`.
    pub fn calc_objective(
        costs: &[Vec<f64>],
        facilities: &[usize],
        assignment: &[usize],
        problem_type: ProblemType,
    ) -> f64 {
        let served = assignment
            .iter()
            .zip(costs)
            .map(|(&slot, row)| row[facilities[slot]]);

        match problem_type {
            ProblemType::Median | ProblemType::CapacitatedMedian { .. } => served.sum(),
            ProblemType::Center => served.reduce(f64::max).unwrap_or(0.0),
        }
    }
}
