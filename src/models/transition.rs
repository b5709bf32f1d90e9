//! Axis-level transition tables.
//!
//! A transition table maps each category of one axis (section or modality)
//! to a row of non-negative weights over destination categories of the same
//! axis. Rows need not sum to 1; the scorer normalizes after blending.
//!
//! Row order is insertion order and defines the axis order used when the
//! state space is derived.

use serde::{Deserialize, Serialize};

/// One row of a transition table: weights out of a single source category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRow {
    /// Source category.
    pub from: String,
    /// Destination weights in insertion order.
    pub weights: Vec<(String, f64)>,
}

impl TransitionRow {
    /// Creates an empty row for a source category.
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            weights: Vec::new(),
        }
    }

    /// Builder: adds a destination weight.
    pub fn with(mut self, to: impl Into<String>, weight: f64) -> Self {
        self.set(to, weight);
        self
    }

    /// Sets the weight toward `to`, replacing an existing entry.
    pub fn set(&mut self, to: impl Into<String>, weight: f64) {
        let to = to.into();
        match self.weights.iter_mut().find(|(dest, _)| *dest == to) {
            Some(entry) => entry.1 = weight,
            None => self.weights.push((to, weight)),
        }
    }

    /// Weight toward `to`. Absent destinations weigh 0.
    pub fn weight(&self, to: &str) -> f64 {
        self.weights
            .iter()
            .find(|(dest, _)| dest == to)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    /// Sum of all weights in the row.
    pub fn total(&self) -> f64 {
        self.weights.iter().map(|(_, w)| w).sum()
    }
}

/// Transition weights between the categories of one axis.
///
/// # Example
/// ```
/// use u_routine::models::TransitionTable;
///
/// let table = TransitionTable::new()
///     .with_row("warmup", [("warmup", 0.1), ("work", 0.75), ("cooldown", 0.15)])
///     .with_row("work", [("work", 0.7), ("cooldown", 0.3)])
///     .with_row("cooldown", [("cooldown", 1.0)]);
///
/// assert_eq!(table.weight("warmup", "work"), Some(0.75));
/// assert_eq!(table.weight("work", "warmup"), Some(0.0));
/// assert_eq!(table.weight("nap", "work"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionTable {
    rows: Vec<TransitionRow>,
}

impl TransitionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: adds (or replaces) the row for `from`.
    pub fn with_row<I, S>(mut self, from: impl Into<String>, weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let row = weights
            .into_iter()
            .fold(TransitionRow::new(from), |row, (to, w)| row.with(to, w));
        self.insert_row(row);
        self
    }

    /// Inserts a row, replacing any existing row with the same source.
    pub fn insert_row(&mut self, row: TransitionRow) {
        match self.rows.iter_mut().find(|r| r.from == row.from) {
            Some(existing) => *existing = row,
            None => self.rows.push(row),
        }
    }

    /// Sets a single weight, creating the source row when needed.
    pub fn set_weight(&mut self, from: impl Into<String>, to: impl Into<String>, weight: f64) {
        let from = from.into();
        match self.rows.iter_mut().find(|r| r.from == from) {
            Some(row) => row.set(to, weight),
            None => self.rows.push(TransitionRow::new(from).with(to, weight)),
        }
    }

    /// Row for a source category.
    pub fn row(&self, from: &str) -> Option<&TransitionRow> {
        self.rows.iter().find(|r| r.from == from)
    }

    /// Weight from `from` to `to`.
    ///
    /// Returns `None` when `from` has no row; a missing destination in an
    /// existing row is `Some(0.0)`.
    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        self.row(from).map(|r| r.weight(to))
    }

    /// Source categories in insertion order. These define the axis.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.from.as_str())
    }

    /// All rows in insertion order.
    pub fn rows(&self) -> &[TransitionRow] {
        &self.rows
    }

    /// Number of source categories.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
