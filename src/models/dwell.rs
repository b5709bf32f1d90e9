//! Dwell time ranges.

use serde::{Deserialize, Serialize};

use super::State;

/// Inclusive `[min, max]` dwell range in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DwellRange {
    /// Shortest dwell (minutes).
    pub min: i64,
    /// Longest dwell (minutes).
    pub max: i64,
}

impl DwellRange {
    /// Range used for states without an override.
    pub const DEFAULT: DwellRange = DwellRange { min: 3, max: 6 };

    /// Creates a range. Not validated; see [`is_valid`](Self::is_valid).
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Both bounds positive and `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min >= 1 && self.min <= self.max
    }

    /// Whether `minutes` falls inside the range.
    #[inline]
    pub fn contains(&self, minutes: i64) -> bool {
        (self.min..=self.max).contains(&minutes)
    }
}

impl Default for DwellRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A per-state dwell override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DwellOverride {
    /// State the override applies to.
    pub state: State,
    /// Dwell range for that state.
    pub range: DwellRange,
}

/// Dwell ranges keyed by state, with a fallback for unlisted states.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DwellTable {
    /// Per-state overrides. Later entries win.
    #[serde(default)]
    pub overrides: Vec<DwellOverride>,
    /// Range for states without an override.
    #[serde(default)]
    pub default_range: DwellRange,
}

impl DwellTable {
    /// Creates a table with only the default range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback range.
    pub fn with_default(mut self, range: DwellRange) -> Self {
        self.default_range = range;
        self
    }

    /// Builder: adds an override for a state.
    pub fn with_range(mut self, state: State, min: i64, max: i64) -> Self {
        self.set_range(state, DwellRange::new(min, max));
        self
    }

    /// Sets (or replaces) the override for a state.
    pub fn set_range(&mut self, state: State, range: DwellRange) {
        match self.overrides.iter_mut().find(|o| o.state == state) {
            Some(o) => o.range = range,
            None => self.overrides.push(DwellOverride { state, range }),
        }
    }

    /// Configured override for a state, if any.
    pub fn override_for(&self, state: &State) -> Option<DwellRange> {
        self.overrides
            .iter()
            .rev()
            .find(|o| o.state == *state)
            .map(|o| o.range)
    }

    /// Effective range for a state.
    pub fn range_for(&self, state: &State) -> DwellRange {
        self.override_for(state).unwrap_or(self.default_range)
    }
}
