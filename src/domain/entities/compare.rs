//! Side-by-side comparison selection.

use crate::domain::entities::College;
use crate::error::AppError;

/// Maximum number of colleges that can be compared at once.
pub const COMPARE_CAPACITY: usize = 3;

/// Colleges selected for comparison, keyed by name, in selection order.
///
/// Session-only: never persisted. When full, further additions are rejected
/// instead of evicting an existing member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompareSelection {
    members: Vec<College>,
}

impl CompareSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a college.
    ///
    /// Returns `Ok(false)` when a college with the same name is already
    /// selected (nothing changes).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the selection already holds
    /// [`COMPARE_CAPACITY`] colleges.
    pub fn add(&mut self, college: College) -> Result<bool, AppError> {
        if self.contains(&college.name) {
            return Ok(false);
        }
        if self.is_full() {
            return Err(AppError::validation(format!(
                "You can compare up to {COMPARE_CAPACITY} colleges at a time"
            )));
        }
        self.members.push(college);
        Ok(true)
    }

    /// Removes a college by name. Returns true if it was selected.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|c| c.name != name);
        self.members.len() != before
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|c| c.name == name)
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= COMPARE_CAPACITY
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[College] {
        &self.members
    }
}
