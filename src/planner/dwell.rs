//! Dwell time sampling.

use rand::Rng;

use crate::error::ConfigurationError;
use crate::models::{DwellRange, DwellTable, State};

/// Draws dwell times from a [`DwellTable`].
///
/// Each draw is uniform over the state's inclusive range and independent of
/// earlier draws. Capping a draw at the remaining budget is the caller's job.
#[derive(Debug, Clone, Copy)]
pub struct DwellSampler<'a> {
    table: &'a DwellTable,
}

impl<'a> DwellSampler<'a> {
    pub fn new(table: &'a DwellTable) -> Self {
        Self { table }
    }

    /// Effective range for a state.
    pub fn range_for(&self, state: &State) -> DwellRange {
        self.table.range_for(state)
    }

    /// Draws a dwell time (minutes) for a state.
    ///
    /// # Errors
    /// [`ConfigurationError::InvalidDwellRange`] if the effective range is
    /// empty or not positive.
    pub fn sample<R: Rng>(&self, state: &State, rng: &mut R) -> Result<i64, ConfigurationError> {
        let range = self.range_for(state);
        if !range.is_valid() {
            return Err(ConfigurationError::InvalidDwellRange {
                state: state.to_string(),
                min: range.min,
                max: range.max,
            });
        }
        Ok(rng.random_range(range.min..=range.max))
    }
}
