//! Planner configuration and per-call requests.
//!
//! `RoutineConfig` is fixed at engine construction. `PlanRequest` and its
//! `PlanPolicy` travel with each planning call, so a single engine can serve
//! requests with different budgets and time policies.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::models::{DwellRange, DwellTable, State, TransitionTable};

/// Construction-time planner configuration.
///
/// # Example
/// ```
/// use u_routine::planner::RoutineConfig;
///
/// let config: RoutineConfig = serde_json::from_str(r#"{
///     "section_transitions": {"rows": [
///         {"from": "work", "weights": [["work", 0.7], ["cooldown", 0.3]]},
///         {"from": "cooldown", "weights": [["cooldown", 1.0]]}
///     ]},
///     "modality_transitions": {"rows": [
///         {"from": "stretch", "weights": [["stretch", 1.0]]}
///     ]}
/// }"#).unwrap();
///
/// assert_eq!(config.alpha, 0.6);
/// assert_eq!(config.terminal_section, "cooldown");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineConfig {
    /// Section-level transition weights.
    pub section_transitions: TransitionTable,
    /// Modality-level transition weights.
    pub modality_transitions: TransitionTable,
    /// Dwell ranges (per-state overrides plus default).
    #[serde(default)]
    pub dwell: DwellTable,
    /// Blend weight: 1.0 = section only, 0.0 = modality only.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Wind-down section every session ends in.
    #[serde(default = "default_terminal_section")]
    pub terminal_section: String,
    /// Modality of the forced wind-down state.
    #[serde(default = "default_terminal_modality")]
    pub terminal_modality: String,
    /// Multiplier on leaving the terminal section once inside it.
    #[serde(default = "default_stickiness")]
    pub stickiness: f64,
}

fn default_alpha() -> f64 {
    0.6
}

fn default_terminal_section() -> String {
    "cooldown".into()
}

fn default_terminal_modality() -> String {
    "stretch".into()
}

fn default_stickiness() -> f64 {
    0.05
}

impl RoutineConfig {
    /// Creates a config with default tunables.
    pub fn new(section_transitions: TransitionTable, modality_transitions: TransitionTable) -> Self {
        Self {
            section_transitions,
            modality_transitions,
            dwell: DwellTable::default(),
            alpha: default_alpha(),
            terminal_section: default_terminal_section(),
            terminal_modality: default_terminal_modality(),
            stickiness: default_stickiness(),
        }
    }

    /// Sets the dwell table.
    pub fn with_dwell(mut self, dwell: DwellTable) -> Self {
        self.dwell = dwell;
        self
    }

    /// Sets the default dwell range.
    pub fn with_default_dwell(mut self, range: DwellRange) -> Self {
        self.dwell.default_range = range;
        self
    }

    /// Sets the section/modality blend weight.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the terminal (wind-down) state.
    pub fn with_terminal(
        mut self,
        section: impl Into<String>,
        modality: impl Into<String>,
    ) -> Self {
        self.terminal_section = section.into();
        self.terminal_modality = modality.into();
        self
    }

    /// Sets the stickiness factor of the terminal section.
    pub fn with_stickiness(mut self, stickiness: f64) -> Self {
        self.stickiness = stickiness;
        self
    }

    /// The state forced at wind-down.
    pub fn terminal_state(&self) -> State {
        State::new(&self.terminal_section, &self.terminal_modality)
    }
}

/// Per-call time policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanPolicy {
    /// Remaining minutes above which the terminal section is penalized.
    pub t_trigger: i64,
    /// Terminal-section multiplier while time remains above `t_trigger`.
    pub early_penalty: f64,
    /// Terminal-section multiplier once time is at or below `t_trigger`.
    pub late_boost: f64,
    /// Remaining minutes at which `hard_end` forces the terminal state.
    pub hard_end_residual: i64,
    /// Top-up step length is `budget / top_up_divisor`.
    pub top_up_divisor: i64,
    /// Lower bound of the top-up step (minutes).
    pub min_top_up: i64,
}

impl Default for PlanPolicy {
    fn default() -> Self {
        Self {
            t_trigger: 6,
            early_penalty: 0.1,
            late_boost: 4.0,
            hard_end_residual: 3,
            top_up_divisor: 10,
            min_top_up: 2,
        }
    }
}

impl PlanPolicy {
    /// Sets the time trigger.
    pub fn with_t_trigger(mut self, minutes: i64) -> Self {
        self.t_trigger = minutes;
        self
    }

    /// Sets the early and late terminal-section multipliers.
    pub fn with_terminal_factors(mut self, early_penalty: f64, late_boost: f64) -> Self {
        self.early_penalty = early_penalty;
        self.late_boost = late_boost;
        self
    }

    /// Sets the hard-end residual threshold.
    pub fn with_hard_end_residual(mut self, minutes: i64) -> Self {
        self.hard_end_residual = minutes;
        self
    }

    /// Sets the top-up rule.
    pub fn with_top_up(mut self, divisor: i64, min_minutes: i64) -> Self {
        self.top_up_divisor = divisor;
        self.min_top_up = min_minutes;
        self
    }

    /// Length of the wind-down step appended when a walk ends outside the
    /// terminal section. A non-positive divisor yields `min_top_up`.
    pub fn top_up_minutes(&self, budget_minutes: i64) -> i64 {
        match self.top_up_divisor {
            d if d >= 1 => (budget_minutes / d).max(self.min_top_up),
            _ => self.min_top_up,
        }
    }

    /// Checks the policy for out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let factor_ok = |f: f64| f.is_finite() && f >= 0.0;
        if !factor_ok(self.early_penalty) {
            return Err(ConfigurationError::InvalidPolicy(format!(
                "early_penalty must be finite and >= 0, got {}",
                self.early_penalty
            )));
        }
        if !factor_ok(self.late_boost) {
            return Err(ConfigurationError::InvalidPolicy(format!(
                "late_boost must be finite and >= 0, got {}",
                self.late_boost
            )));
        }
        if self.top_up_divisor < 1 {
            return Err(ConfigurationError::InvalidPolicy(format!(
                "top_up_divisor must be >= 1, got {}",
                self.top_up_divisor
            )));
        }
        if self.min_top_up < 1 {
            return Err(ConfigurationError::InvalidPolicy(format!(
                "min_top_up must be >= 1, got {}",
                self.min_top_up
            )));
        }
        Ok(())
    }
}

/// Input of a single planning call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// State the walk starts in.
    pub start: State,
    /// Total requested duration (minutes).
    pub budget_minutes: i64,
    /// Force the terminal state once the residual threshold is reached.
    #[serde(default = "default_hard_end")]
    pub hard_end: bool,
    /// Time policy.
    #[serde(default)]
    pub policy: PlanPolicy,
}

fn default_hard_end() -> bool {
    true
}

impl PlanRequest {
    /// Creates a request with `hard_end` on and the default policy.
    pub fn new(start: State, budget_minutes: i64) -> Self {
        Self {
            start,
            budget_minutes,
            hard_end: default_hard_end(),
            policy: PlanPolicy::default(),
        }
    }

    /// Enables or disables the hard-end override.
    pub fn with_hard_end(mut self, hard_end: bool) -> Self {
        self.hard_end = hard_end;
        self
    }

    /// Sets the time policy.
    pub fn with_policy(mut self, policy: PlanPolicy) -> Self {
        self.policy = policy;
        self
    }
}
