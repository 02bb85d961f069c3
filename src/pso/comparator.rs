//! Objective-direction comparator.

use crate::error::PsoError;
use crate::problem::ObjectiveType;

/// Answers "is fitness `a` preferred over fitness `b`" for the active
/// objective direction.
///
/// Every fitness comparison in the engine goes through this type: global-best
/// selection, personal-best refresh and the all-time best update.
///
/// Comparisons are strict, so equal values are never preferred over each
/// other. `NaN` is never preferred and never loses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparator {
    objective: ObjectiveType,
}

impl Comparator {
    pub fn new(objective: ObjectiveType) -> Self {
        Self { objective }
    }

    /// Builds a comparator from a textual objective tag.
    ///
    /// # Errors
    ///
    /// [`PsoError::UnsupportedObjective`] for anything other than
    /// minimize/maximize.
    pub fn from_tag(tag: &str) -> Result<Self, PsoError> {
        Ok(Self::new(tag.parse()?))
    }

    /// Reconfigures the direction.
    pub fn set_type(&mut self, objective: ObjectiveType) {
        self.objective = objective;
    }

    pub fn objective(&self) -> ObjectiveType {
        self.objective
    }

    /// `a < b` when minimizing, `a > b` when maximizing.
    #[inline]
    pub fn prefers(&self, a: f64, b: f64) -> bool {
        match self.objective {
            ObjectiveType::Minimize => a < b,
            ObjectiveType::Maximize => a > b,
        }
    }
}
