//! Input validation for planner configurations.
//!
//! Checks structural integrity of the transition and dwell tables before an
//! engine is built. Detects:
//! - Empty axes
//! - Transition entries naming categories outside their axis
//! - Negative or non-finite weights
//! - Blend and stickiness factors outside [0, 1]
//! - Invalid dwell ranges
//! - A terminal state outside the state space
//!
//! All findings are collected; validation never repairs a configuration.

use std::collections::HashSet;
use std::fmt;

use crate::models::{DwellRange, TransitionTable};
use crate::planner::RoutineConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A transition table has no rows.
    EmptyAxis,
    /// A destination category is not a source category of the same table.
    UnknownCategory,
    /// A weight is negative, NaN or infinite.
    InvalidWeight,
    /// `alpha` lies outside [0, 1].
    InvalidBlendWeight,
    /// `stickiness` lies outside [0, 1].
    InvalidStickiness,
    /// A dwell range has `min < 1` or `min > max`.
    InvalidDwellRange,
    /// The terminal state is not part of the state space.
    UnknownTerminalState,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a planner configuration.
///
/// Checks:
/// 1. Both transition tables are non-empty
/// 2. Every destination names a category of the same axis
/// 3. All weights are finite and non-negative
/// 4. `alpha` and `stickiness` lie in [0, 1]
/// 5. The default and every override dwell range are valid
/// 6. The terminal section and modality are configured categories
///
/// Dwell overrides for states outside the space are allowed and logged; they
/// are never sampled.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &RoutineConfig) -> ValidationResult {
    let mut errors = Vec::new();

    let sections = check_table("section", &config.section_transitions, &mut errors);
    let modalities = check_table("modality", &config.modality_transitions, &mut errors);

    if !(0.0..=1.0).contains(&config.alpha) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidBlendWeight,
            format!("alpha must lie in [0, 1], got {}", config.alpha),
        ));
    }
    if !(0.0..=1.0).contains(&config.stickiness) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidStickiness,
            format!("stickiness must lie in [0, 1], got {}", config.stickiness),
        ));
    }

    check_dwell("default dwell range", config.dwell.default_range, &mut errors);
    for o in &config.dwell.overrides {
        check_dwell(&format!("dwell range for ({})", o.state), o.range, &mut errors);
        if !sections.contains(o.state.section.as_str())
            || !modalities.contains(o.state.modality.as_str())
        {
            tracing::warn!(
                state = %o.state,
                "dwell override for a state outside the state space is never used"
            );
        }
    }

    if !sections.is_empty() && !sections.contains(config.terminal_section.as_str()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownTerminalState,
            format!("terminal section '{}' is not configured", config.terminal_section),
        ));
    }
    if !modalities.is_empty() && !modalities.contains(config.terminal_modality.as_str()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownTerminalState,
            format!("terminal modality '{}' is not configured", config.terminal_modality),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks one axis table and returns its category set.
fn check_table<'a>(
    axis: &str,
    table: &'a TransitionTable,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    if table.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyAxis,
            format!("{axis} transition table is empty"),
        ));
    }

    let categories: HashSet<&str> = table.categories().collect();

    for row in table.rows() {
        for (to, weight) in &row.weights {
            if !categories.contains(to.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCategory,
                    format!(
                        "{axis} transition '{}' -> '{}' targets an unknown category",
                        row.from, to
                    ),
                ));
            }
            if !weight.is_finite() || *weight < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidWeight,
                    format!(
                        "{axis} transition '{}' -> '{}' has invalid weight {}",
                        row.from, to, weight
                    ),
                ));
            }
        }
    }

    categories
}

fn check_dwell(label: &str, range: DwellRange, errors: &mut Vec<ValidationError>) {
    if !range.is_valid() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidDwellRange,
            format!(
                "{label} must satisfy 1 <= min <= max, got [{}, {}]",
                range.min, range.max
            ),
        ));
    }
}
