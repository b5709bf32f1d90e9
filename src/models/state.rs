//! States and the derived state space.
//!
//! A state is a `(section, modality)` pair. The state space is the Cartesian
//! product of the two axes, section-major and modality-minor, with each axis
//! taken from the source categories of its transition table.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TransitionTable;
use crate::error::ConfigurationError;

/// A `(section, modality)` pair the planner walks between.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    /// Coarse phase (e.g. warmup, work, cooldown).
    pub section: String,
    /// Activity type within the phase (e.g. strength, stretch).
    pub modality: String,
}

impl State {
    /// Creates a state.
    pub fn new(section: impl Into<String>, modality: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            modality: modality.into(),
        }
    }

    /// Whether this state belongs to `section`.
    #[inline]
    pub fn is_in_section(&self, section: &str) -> bool {
        self.section == section
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.section, self.modality)
    }
}

/// The ordered set of all states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSpace {
    sections: Vec<String>,
    modalities: Vec<String>,
    states: Vec<State>,
}

impl StateSpace {
    /// Derives the state space from the two axis tables.
    ///
    /// # Errors
    /// [`ConfigurationError::EmptyAxis`] if either table has no rows.
    ///
    /// # Example
    /// ```
    /// use u_routine::models::{State, StateSpace, TransitionTable};
    ///
    /// let sections = TransitionTable::new()
    ///     .with_row("work", [("work", 1.0)])
    ///     .with_row("cooldown", [("cooldown", 1.0)]);
    /// let modalities = TransitionTable::new()
    ///     .with_row("yoga", [("yoga", 1.0)])
    ///     .with_row("stretch", [("stretch", 1.0)]);
    ///
    /// let space = StateSpace::from_tables(&sections, &modalities).unwrap();
    /// assert_eq!(space.len(), 4);
    /// assert_eq!(space.states()[1], State::new("work", "stretch"));
    /// ```
    pub fn from_tables(
        sections: &TransitionTable,
        modalities: &TransitionTable,
    ) -> Result<Self, ConfigurationError> {
        if sections.is_empty() {
            return Err(ConfigurationError::EmptyAxis { axis: "section" });
        }
        if modalities.is_empty() {
            return Err(ConfigurationError::EmptyAxis { axis: "modality" });
        }

        let sections: Vec<String> = sections.categories().map(str::to_owned).collect();
        let modalities: Vec<String> = modalities.categories().map(str::to_owned).collect();
        let states = sections
            .iter()
            .flat_map(|s| modalities.iter().map(move |m| State::new(s.clone(), m.clone())))
            .collect();

        Ok(Self {
            sections,
            modalities,
            states,
        })
    }

    /// All states, section-major.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Section axis in configuration order.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Modality axis in configuration order.
    pub fn modalities(&self) -> &[String] {
        &self.modalities
    }

    /// Position of a state in [`states`](Self::states).
    pub fn index_of(&self, state: &State) -> Option<usize> {
        let s = self.sections.iter().position(|s| *s == state.section)?;
        let m = self.modalities.iter().position(|m| *m == state.modality)?;
        Some(s * self.modalities.len() + m)
    }

    /// Whether both axis values of `state` are configured.
    pub fn contains(&self, state: &State) -> bool {
        self.index_of(state).is_some()
    }

    /// Checks that `state` is part of the space.
    pub fn require(&self, state: &State) -> Result<(), ConfigurationError> {
        if self.contains(state) {
            Ok(())
        } else {
            Err(ConfigurationError::UnknownState {
                section: state.section.clone(),
                modality: state.modality.clone(),
            })
        }
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the space has no states. Never true for a built space.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
