//! Session (plan) model.
//!
//! A session is the ordered list of plan steps produced by one planning
//! call. It is a plain return value: the planner never mutates it after
//! handing it back.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::State;

/// One scheduled segment: a state held for a number of minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    /// State occupied during this step.
    pub state: State,
    /// Dwell time (minutes).
    pub duration_minutes: i64,
}

impl PlanStep {
    /// Creates a plan step.
    pub fn new(state: State, duration_minutes: i64) -> Self {
        Self {
            state,
            duration_minutes,
        }
    }
}

/// A generated session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Steps in execution order.
    pub steps: Vec<PlanStep>,
    /// Budget the session was planned against (minutes).
    pub budget_minutes: i64,
}

impl Session {
    /// Creates a session from its steps.
    pub fn new(steps: Vec<PlanStep>, budget_minutes: i64) -> Self {
        Self {
            steps,
            budget_minutes,
        }
    }

    /// Sum of all step durations (minutes).
    pub fn total_minutes(&self) -> i64 {
        self.steps.iter().map(|s| s.duration_minutes).sum()
    }

    /// Minutes beyond the budget. Zero when the budget was not exceeded.
    pub fn overshoot_minutes(&self) -> i64 {
        (self.total_minutes() - self.budget_minutes.max(0)).max(0)
    }

    /// Final step.
    pub fn last_step(&self) -> Option<&PlanStep> {
        self.steps.last()
    }

    /// Whether the final step lies in `section`.
    pub fn ends_in(&self, section: &str) -> bool {
        self.last_step()
            .is_some_and(|s| s.state.is_in_section(section))
    }

    /// Steps whose state lies in `section`.
    pub fn steps_in_section(&self, section: &str) -> Vec<&PlanStep> {
        self.steps
            .iter()
            .filter(|s| s.state.is_in_section(section))
            .collect()
    }

    /// Total minutes per section.
    pub fn minutes_by_section(&self) -> HashMap<String, i64> {
        let mut out: HashMap<String, i64> = HashMap::new();
        for step in &self.steps {
            *out.entry(step.state.section.clone()).or_insert(0) += step.duration_minutes;
        }
        out
    }

    /// Total minutes per modality.
    pub fn minutes_by_modality(&self) -> HashMap<String, i64> {
        let mut out: HashMap<String, i64> = HashMap::new();
        for step in &self.steps {
            *out.entry(step.state.modality.clone()).or_insert(0) += step.duration_minutes;
        }
        out
    }

    /// `(index, duration, section, modality)` rows for display, 1-based.
    pub fn rows(&self) -> impl Iterator<Item = (usize, i64, &str, &str)> {
        self.steps.iter().enumerate().map(|(i, s)| {
            (
                i + 1,
                s.duration_minutes,
                s.state.section.as_str(),
                s.state.modality.as_str(),
            )
        })
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the session has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
