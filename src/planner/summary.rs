//! Session summary metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total | Sum of step durations |
//! | Overshoot | max(0, total - budget) |
//! | Budget share | Minutes per section / total |
//! | Terminal reached | Last step lies in the terminal section |
//! | Top-up applied | Walk exceeded the budget through the wind-down step |

use std::collections::HashMap;

use crate::models::Session;

/// Session indicators. All durations are in minutes.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// Sum of all step durations.
    pub total_minutes: i64,
    /// Requested budget.
    pub budget_minutes: i64,
    /// Minutes beyond the budget.
    pub overshoot_minutes: i64,
    /// Number of steps.
    pub step_count: usize,
    /// Minutes per section.
    pub minutes_by_section: HashMap<String, i64>,
    /// Fraction of total time per section (0.0..1.0).
    pub section_share: HashMap<String, f64>,
    /// Whether the final step is in the terminal section.
    pub terminal_reached: bool,
    /// Whether a top-up step was appended past the budget.
    pub top_up_applied: bool,
}

impl SessionSummary {
    /// Computes the summary of a session.
    ///
    /// # Arguments
    /// * `session` - The generated session.
    /// * `terminal_section` - The wind-down section sessions must end in.
    pub fn calculate(session: &Session, terminal_section: &str) -> Self {
        let total = session.total_minutes();
        let overshoot = session.overshoot_minutes();
        let by_section = session.minutes_by_section();

        let share = if total > 0 {
            by_section
                .iter()
                .map(|(k, v)| (k.clone(), *v as f64 / total as f64))
                .collect()
        } else {
            HashMap::new()
        };

        Self {
            total_minutes: total,
            budget_minutes: session.budget_minutes,
            overshoot_minutes: overshoot,
            step_count: session.len(),
            minutes_by_section: by_section,
            section_share: share,
            terminal_reached: session.ends_in(terminal_section),
            top_up_applied: ends_with_top_up(session, terminal_section),
        }
    }
}

/// The walk always spends exactly the (non-negative) budget, so a terminal
/// final step preceded by the full budget is the appended top-up.
fn ends_with_top_up(session: &Session, terminal_section: &str) -> bool {
    match session.last_step() {
        Some(last) if last.state.is_in_section(terminal_section) => {
            session.total_minutes() - last.duration_minutes == session.budget_minutes.max(0)
        }
        _ => false,
    }
}
