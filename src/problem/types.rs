//! Problem variant and objective direction tags.

use crate::error::PsoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveType {
    Minimize,
    Maximize,
}

impl ObjectiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveType::Minimize => "minimize",
            ObjectiveType::Maximize => "maximize",
        }
    }
}

impl fmt::Display for ObjectiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectiveType {
    type Err = PsoError;

    /// Parses `minimize`/`min` or `maximize`/`max`, ignoring case.
    ///
    /// Any other tag is a configuration error; there is no fallback direction.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimize" | "min" => Ok(ObjectiveType::Minimize),
            "maximize" | "max" => Ok(ObjectiveType::Maximize),
            _ => Err(PsoError::UnsupportedObjective(s.to_string())),
        }
    }
}

/// Facility location problem variant.
///
/// The variant selects both the assignment rule and the objective
/// aggregation; see [`AssignmentStrategy`](super::AssignmentStrategy) and
/// [`ObjectiveStrategy`](super::ObjectiveStrategy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    /// Uncapacitated, customers go to the cheapest open facility,
    /// objective is the total assignment cost.
    Median,

    /// Uncapacitated, customers go to the cheapest open facility,
    /// objective is the largest single assignment cost.
    Center,

    /// Every open facility serves at most `capacity` customers,
    /// objective is the total assignment cost.
    CapacitatedMedian {
        /// Maximum number of customers per open facility.
        capacity: usize,
    },
}

impl ProblemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemType::Median => "median",
            ProblemType::Center => "center",
            ProblemType::CapacitatedMedian { .. } => "capacitated_median",
        }
    }

    pub fn is_capacitated(&self) -> bool {
        matches!(self, ProblemType::CapacitatedMedian { .. })
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemType::CapacitatedMedian { capacity } => {
                write!(f, "capacitated_median({capacity})")
            }
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for ProblemType {
    type Err = PsoError;

    /// Parses `median`, `center`, or `capacitated_median:<capacity>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        match tag.as_str() {
            "median" | "p-median" => return Ok(ProblemType::Median),
            "center" | "p-center" => return Ok(ProblemType::Center),
            _ => {}
        }
        if let Some(cap) = tag.strip_prefix("capacitated_median:") {
            let capacity = cap
                .parse::<usize>()
                .map_err(|_| PsoError::UnsupportedProblemType(s.to_string()))?;
            return Ok(ProblemType::CapacitatedMedian { capacity });
        }
        Err(PsoError::UnsupportedProblemType(s.to_string()))
    }
}
