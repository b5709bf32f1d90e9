//! Error types.
//!
//! Every failure the planner can report is a configuration defect of the
//! caller. Nothing here is retried or repaired.

use thiserror::Error;

use crate::validation::ValidationError;

/// A malformed or inconsistent planner configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// One or more validation checks failed.
    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    /// A transition table has no categories.
    #[error("{axis} transition table is empty")]
    EmptyAxis { axis: &'static str },

    /// A state whose section or modality is not part of the state space.
    #[error("unknown state ({section}, {modality})")]
    UnknownState { section: String, modality: String },

    /// A category has no row in its transition table.
    #[error("no {axis} transition row for '{category}'")]
    MissingTransitionRow {
        axis: &'static str,
        category: String,
    },

    /// A dwell range that cannot be sampled.
    #[error("invalid dwell range [{min}, {max}] for ({state})")]
    InvalidDwellRange { state: String, min: i64, max: i64 },

    /// A per-call planning policy is out of range.
    #[error("invalid plan policy: {0}")]
    InvalidPolicy(String),

    /// The computed distribution could not be sampled.
    #[error("invalid transition distribution: {0}")]
    Distribution(String),
}

impl From<Vec<ValidationError>> for ConfigurationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ConfigurationError::Invalid(errors)
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display_joins_validation_errors() {
        let err = ConfigurationError::from(vec![
            ValidationError::new(ValidationErrorKind::EmptyAxis, "section table is empty"),
            ValidationError::new(ValidationErrorKind::InvalidBlendWeight, "alpha=2"),
        ]);
        let text = err.to_string();
        assert!(text.starts_with("invalid configuration:"));
        assert!(text.contains("section table is empty; "));
        assert!(text.contains("alpha=2"));
    }

    #[test]
    fn test_unknown_state_display() {
        let err = ConfigurationError::UnknownState {
            section: "nap".into(),
            modality: "yoga".into(),
        };
        assert_eq!(err.to_string(), "unknown state (nap, yoga)");
    }
}
