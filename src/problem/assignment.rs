//! Customer-to-facility assignment rules.

use super::types::ProblemType;

/// Derives a customer assignment from a set of open facilities.
///
/// The returned vector has one entry per customer (row of `costs`). Entry
/// `k` means the customer is served by `facilities[k]`, so every value lies
/// in `0..facilities.len()`.
///
/// All rules are deterministic: ties go to the lowest facility slot.
pub struct AssignmentStrategy;

impl AssignmentStrategy {
    /// Assigns every customer according to the rule for `problem_type`.
    ///
    /// `facilities` must be non-empty and index valid columns of `costs`;
    /// [`ProblemData`](super::ProblemData) guarantees both for particle
    /// positions.
    pub fn assign(costs: &[Vec<f64>], facilities: &[usize], problem_type: ProblemType) -> Vec<usize> {
        match problem_type {
            ProblemType::Median | ProblemType::Center => assign_nearest(costs, facilities),
            ProblemType::CapacitatedMedian { capacity } => {
                assign_capacitated(costs, facilities, capacity)
            }
        }
    }
}

/// Each customer goes to its cheapest open facility.
fn assign_nearest(costs: &[Vec<f64>], facilities: &[usize]) -> Vec<usize> {
    costs.iter().map(|row| nearest_slot(row, facilities)).collect()
}

fn nearest_slot(row: &[f64], facilities: &[usize]) -> usize {
    let mut best_slot = 0;
    for (slot, &site) in facilities.iter().enumerate().skip(1) {
        if row[site] < row[facilities[best_slot]] {
            best_slot = slot;
        }
    }
    best_slot
}

/// Customers are served in index order, each taking the cheapest open
/// facility that still has room.
///
/// If every facility is full (only possible when the capacity check in
/// `ProblemData::new` was bypassed) the customer falls back to its nearest
/// facility.
fn assign_capacitated(costs: &[Vec<f64>], facilities: &[usize], capacity: usize) -> Vec<usize> {
    let mut load = vec![0usize; facilities.len()];

    costs
        .iter()
        .map(|row| {
            let mut chosen: Option<usize> = None;
            for (slot, &site) in facilities.iter().enumerate() {
                if load[slot] >= capacity {
                    continue;
                }
                match chosen {
                    Some(best) if row[site] >= row[facilities[best]] => {}
                    _ => chosen = Some(slot),
                }
            }

            let slot = chosen.unwrap_or_else(|| nearest_slot(row, facilities));
            load[slot] += 1;
            slot
        })
        .collect()
}
