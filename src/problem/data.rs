//! Immutable facility location instance.

use super::assignment::AssignmentStrategy;
use super::objective::ObjectiveStrategy;
use super::types::{ObjectiveType, ProblemType};
use crate::error::PsoError;
use serde::Serialize;

/// A validated facility location instance.
///
/// Rows of `costs` are customers and columns are candidate facility sites.
/// A solution opens `num_facilities` distinct sites; in the usual square
/// instance the sites are the customers themselves.
///
/// # Examples
///
/// ```
/// use u_swarm::problem::{ObjectiveType, ProblemData, ProblemType};
///
/// let data = ProblemData::new(
///     "tiny",
///     vec![vec![0.0, 2.0], vec![2.0, 0.0], vec![1.0, 3.0]],
///     1,
///     ProblemType::Median,
///     ObjectiveType::Minimize,
/// )
/// .unwrap();
/// assert_eq!(data.num_customers(), 3);
/// assert_eq!(data.num_sites(), 2);
/// assert!((data.calc_objective(&[0]).unwrap() - 3.0).abs() < 1e-12);
/// assert!(data.calc_objective(&[]).is_err());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ProblemData {
    name: String,
    costs: Vec<Vec<f64>>,
    num_facilities: usize,
    num_customers: usize,
    num_sites: usize,
    problem_type: ProblemType,
    objective_type: ObjectiveType,
}

impl ProblemData {
    /// Builds and validates an instance.
    ///
    /// # Errors
    ///
    /// [`PsoError::InvalidProblem`] if the matrix is empty, ragged or holds
    /// non-finite values, if `num_facilities` is outside `1..=num_sites`, or
    /// if a capacitated instance cannot serve every customer.
    pub fn new(
        name: impl Into<String>,
        costs: Vec<Vec<f64>>,
        num_facilities: usize,
        problem_type: ProblemType,
        objective_type: ObjectiveType,
    ) -> Result<Self, PsoError> {
        let num_customers = costs.len();
        if num_customers == 0 {
            return Err(PsoError::InvalidProblem("cost matrix has no customers".into()));
        }
        let num_sites = costs[0].len();
        if num_sites == 0 {
            return Err(PsoError::InvalidProblem("cost matrix has no sites".into()));
        }
        for (c, row) in costs.iter().enumerate() {
            if row.len() != num_sites {
                return Err(PsoError::InvalidProblem(format!(
                    "customer {c} has {} costs, expected {num_sites}",
                    row.len()
                )));
            }
            if let Some(s) = row.iter().position(|v| !v.is_finite()) {
                return Err(PsoError::InvalidProblem(format!(
                    "cost[{c}][{s}] is not finite"
                )));
            }
        }
        if num_facilities == 0 || num_facilities > num_sites {
            return Err(PsoError::InvalidProblem(format!(
                "num_facilities must be in 1..={num_sites}, got {num_facilities}"
            )));
        }
        if let ProblemType::CapacitatedMedian { capacity } = problem_type {
            if capacity.saturating_mul(num_facilities) < num_customers {
                return Err(PsoError::InvalidProblem(format!(
                    "{num_facilities} facilities of capacity {capacity} cannot serve {num_customers} customers"
                )));
            }
        }

        Ok(Self {
            name: name.into(),
            costs,
            num_facilities,
            num_customers,
            num_sites,
            problem_type,
            objective_type,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn costs(&self) -> &[Vec<f64>] {
        &self.costs
    }

    /// Number of facilities a solution opens (particle dimensionality).
    pub fn num_facilities(&self) -> usize {
        self.num_facilities
    }

    pub fn num_customers(&self) -> usize {
        self.num_customers
    }

    /// Number of candidate sites (domain size of each particle dimension).
    pub fn num_sites(&self) -> usize {
        self.num_sites
    }

    pub fn problem_type(&self) -> ProblemType {
        self.problem_type
    }

    pub fn objective_type(&self) -> ObjectiveType {
        self.objective_type
    }

    /// Checks that `facilities` opens exactly `num_facilities` distinct,
    /// in-range sites.
    ///
    /// # Errors
    ///
    /// [`PsoError::InvalidProblem`] describing the first violation.
    pub fn check_facilities(&self, facilities: &[usize]) -> Result<(), PsoError> {
        if facilities.len() != self.num_facilities {
            return Err(PsoError::InvalidProblem(format!(
                "position has {} facilities, expected {}",
                facilities.len(),
                self.num_facilities
            )));
        }
        for (i, &site) in facilities.iter().enumerate() {
            if site >= self.num_sites {
                return Err(PsoError::InvalidProblem(format!(
                    "site {site} out of range 0..{}",
                    self.num_sites
                )));
            }
            if facilities[..i].contains(&site) {
                return Err(PsoError::InvalidProblem(format!("site {site} opened twice")));
            }
        }
        Ok(())
    }

    /// Customer assignment for a set of open facilities.
    ///
    /// # Errors
    ///
    /// See [`ProblemData::check_facilities`].
    pub fn assign(&self, facilities: &[usize]) -> Result<Vec<usize>, PsoError> {
        self.check_facilities(facilities)?;
        Ok(self.assign_unchecked(facilities))
    }

    /// Objective value of a facility set: assigns customers first, then
    /// scores the assignment. Pure in `(costs, facilities, type)`.
    ///
    /// # Errors
    ///
    /// See [`ProblemData::check_facilities`].
    pub fn calc_objective(&self, facilities: &[usize]) -> Result<f64, PsoError> {
        self.check_facilities(facilities)?;
        Ok(self.objective_unchecked(facilities))
    }

    /// `assign` for positions already known to be valid.
    pub(crate) fn assign_unchecked(&self, facilities: &[usize]) -> Vec<usize> {
        AssignmentStrategy::assign(&self.costs, facilities, self.problem_type)
    }

    /// `calc_objective` for positions already known to be valid.
    pub(crate) fn objective_unchecked(&self, facilities: &[usize]) -> f64 {
        let assignment = self.assign_unchecked(facilities);
        ObjectiveStrategy::calc_objective(&self.costs, facilities, &assignment, self.problem_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square(n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect()
    }

    #[test]
    fn test_new_valid() {
        let data =
            ProblemData::new("line", square(5), 2, ProblemType::Median, ObjectiveType::Minimize)
                .unwrap();
        assert_eq!(data.name(), "line");
        assert_eq!(data.num_customers(), 5);
        assert_eq!(data.num_sites(), 5);
        assert_eq!(data.num_facilities(), 2);
    }

    #[test]
    fn test_rejects_empty_matrix() {
        let err = ProblemData::new("e", vec![], 1, ProblemType::Median, ObjectiveType::Minimize);
        assert!(matches!(err, Err(PsoError::InvalidProblem(_))));
    }

    #[test]
    fn test_rejects_ragged_matrix() {
        let costs = vec![vec![1.0, 2.0], vec![1.0]];
        let err = ProblemData::new("r", costs, 1, ProblemType::Median, ObjectiveType::Minimize);
        assert!(matches!(err, Err(PsoError::InvalidProblem(_))));
    }

    #[test]
    fn test_rejects_non_finite_cost() {
        let costs = vec![vec![1.0, f64::NAN]];
        let err = ProblemData::new("n", costs, 1, ProblemType::Median, ObjectiveType::Minimize);
        assert!(matches!(err, Err(PsoError::InvalidProblem(_))));
    }

    #[test]
    fn test_rejects_bad_facility_count() {
        for p in [0, 4] {
            let err =
                ProblemData::new("p", square(3), p, ProblemType::Center, ObjectiveType::Minimize);
            assert!(matches!(err, Err(PsoError::InvalidProblem(_))), "p = {p}");
        }
    }

    #[test]
    fn test_rejects_insufficient_capacity() {
        let err = ProblemData::new(
            "cap",
            square(5),
            2,
            ProblemType::CapacitatedMedian { capacity: 2 },
            ObjectiveType::Minimize,
        );
        assert!(matches!(err, Err(PsoError::InvalidProblem(_))));
    }

    #[test]
    fn test_calc_objective_matches_strategies() {
        let data =
            ProblemData::new("line", square(5), 2, ProblemType::Median, ObjectiveType::Minimize)
                .unwrap();
        // sites 1 and 3: customers 0,1,2 -> 1 ; 3,4 -> 3 (tie at 2 goes to slot 0)
        assert_eq!(data.assign(&[1, 3]).unwrap(), vec![0, 0, 0, 1, 1]);
        assert!((data.calc_objective(&[1, 3]).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_calc_objective_rejects_invalid_facilities() {
        let data =
            ProblemData::new("line", square(5), 2, ProblemType::Median, ObjectiveType::Minimize)
                .unwrap();
        for facilities in [&[][..], &[1][..], &[1, 5][..], &[2, 2][..], &[0, 1, 2][..]] {
            assert!(
                matches!(data.calc_objective(facilities), Err(PsoError::InvalidProblem(_))),
                "{facilities:?}"
            );
            assert!(
                matches!(data.assign(facilities), Err(PsoError::InvalidProblem(_))),
                "{facilities:?}"
            );
        }
        assert!(data.check_facilities(&[4, 0]).is_ok());
    }

    proptest! {
        #[test]
        fn prop_calc_objective_is_deterministic(
            n in 2usize..8,
            seed_sites in proptest::collection::vec(0usize..64, 1..4),
        ) {
            let mut facilities: Vec<usize> = seed_sites.iter().map(|s| s % n).collect();
            facilities.sort_unstable();
            facilities.dedup();
            let data = ProblemData::new(
                "prop",
                square(n),
                facilities.len(),
                ProblemType::Center,
                ObjectiveType::Minimize,
            )
            .unwrap();
            let first = data.calc_objective(&facilities).unwrap();
            let second = data.calc_objective(&facilities).unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(data.assign(&facilities).unwrap(), data.assign(&facilities).unwrap());
        }
    }
}
