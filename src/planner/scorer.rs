//! Time-aware transition scoring.
//!
//! # Algorithm
//!
//! For the current state `(sec, mod)` and every candidate `(sec2, mod2)`:
//!
//! 1. `ps = S[sec][sec2]`, `pm = M[mod][mod2]` (absent destinations weigh 0).
//! 2. `score = alpha * ps + (1 - alpha) * pm`.
//! 3. Leaving the terminal section: `score *= stickiness`.
//! 4. Entering the terminal section: `score *= early_penalty` while more than
//!    `t_trigger` minutes remain, else `score *= late_boost`.
//! 5. Normalize. An all-zero score vector becomes uniform.
//! 6. Draw one candidate.
//!
//! # Complexity
//! O(|S| * |M|) per call.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use super::PlanPolicy;
use crate::error::ConfigurationError;
use crate::models::{State, StateSpace, TransitionRow, TransitionTable};

/// Scores next-state candidates for one engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct TransitionScorer<'a> {
    space: &'a StateSpace,
    sections: &'a TransitionTable,
    modalities: &'a TransitionTable,
    alpha: f64,
    terminal_section: &'a str,
    stickiness: f64,
}

impl<'a> TransitionScorer<'a> {
    /// Creates a scorer over a state space and its axis tables.
    pub fn new(
        space: &'a StateSpace,
        sections: &'a TransitionTable,
        modalities: &'a TransitionTable,
        alpha: f64,
        terminal_section: &'a str,
        stickiness: f64,
    ) -> Self {
        Self {
            space,
            sections,
            modalities,
            alpha,
            terminal_section,
            stickiness,
        }
    }

    /// Unnormalized candidate scores, one per state in space order.
    ///
    /// # Errors
    /// [`ConfigurationError::InvalidPolicy`] for a bad policy and
    /// [`ConfigurationError::MissingTransitionRow`] if either axis value of
    /// `current` has no transition row.
    pub fn scores(
        &self,
        current: &State,
        minutes_left: i64,
        policy: &PlanPolicy,
    ) -> Result<Vec<f64>, ConfigurationError> {
        policy.validate()?;
        let section_row = row(self.sections, "section", &current.section)?;
        let modality_row = row(self.modalities, "modality", &current.modality)?;
        let in_terminal = current.is_in_section(self.terminal_section);
        let terminal_factor = if minutes_left > policy.t_trigger {
            policy.early_penalty
        } else {
            policy.late_boost
        };

        let scores = self
            .space
            .states()
            .iter()
            .map(|cand| {
                let ps = section_row.weight(&cand.section);
                let pm = modality_row.weight(&cand.modality);
                let mut score = self.alpha * ps + (1.0 - self.alpha) * pm;

                let cand_terminal = cand.is_in_section(self.terminal_section);
                if in_terminal && !cand_terminal {
                    score *= self.stickiness;
                }
                if cand_terminal {
                    score *= terminal_factor;
                }
                score
            })
            .collect();

        Ok(scores)
    }

    /// Normalized next-state distribution, one probability per state.
    ///
    /// When every score is zero the distribution is uniform over all states.
    /// This fallback is deliberate and logged at `warn`.
    pub fn distribution(
        &self,
        current: &State,
        minutes_left: i64,
        policy: &PlanPolicy,
    ) -> Result<Vec<f64>, ConfigurationError> {
        let mut probs = self.scores(current, minutes_left, policy)?;
        let total: f64 = probs.iter().sum();

        if total == 0.0 {
            tracing::warn!(
                state = %current,
                minutes_left,
                "all transition scores are zero; falling back to uniform distribution"
            );
            let uniform = 1.0 / probs.len() as f64;
            probs.iter_mut().for_each(|p| *p = uniform);
        } else {
            probs.iter_mut().for_each(|p| *p /= total);
        }

        Ok(probs)
    }

    /// Draws the next state.
    pub fn sample<R: Rng>(
        &self,
        current: &State,
        minutes_left: i64,
        policy: &PlanPolicy,
        rng: &mut R,
    ) -> Result<State, ConfigurationError> {
        let probs = self.distribution(current, minutes_left, policy)?;
        let dist = WeightedIndex::new(&probs)
            .map_err(|e| ConfigurationError::Distribution(e.to_string()))?;
        Ok(self.space.states()[dist.sample(rng)].clone())
    }
}

fn row<'t>(
    table: &'t TransitionTable,
    axis: &'static str,
    category: &str,
) -> Result<&'t TransitionRow, ConfigurationError> {
    table
        .row(category)
        .ok_or_else(|| ConfigurationError::MissingTransitionRow {
            axis,
            category: category.to_string(),
        })
}
