//! Session builder: the budgeted walk.
//!
//! # Algorithm
//!
//! ```text
//! Building ──(time_left <= residual, hard_end, not terminal)──> ForceTerminal
//!    │  ^                                                          │
//!    │  └──────────────────────────────────────────────────────────┘
//!    └──(time_left <= 0)──> Done
//! ```
//!
//! 1. `Building`: draw a dwell for the current state, cap it at `time_left`,
//!    record the step, then advance through the scorer.
//! 2. `ForceTerminal`: jump straight to the terminal state.
//! 3. `Done`: if the last step is outside the terminal section, append a
//!    terminal step of `max(min_top_up, budget / top_up_divisor)` minutes.
//!    This top-up may exceed the budget and always applies.
//!
//! Walk progress lives in a call-local `Walk`; the builder itself only
//! borrows read-only configuration.

use rand::Rng;

use super::{DwellSampler, PlanRequest, TransitionScorer};
use crate::error::ConfigurationError;
use crate::models::{PlanStep, Session, State};

/// Phase of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Building,
    ForceTerminal,
    Done,
}

/// Per-call walk progress.
#[derive(Debug)]
struct Walk {
    state: State,
    time_left: i64,
    steps: Vec<PlanStep>,
}

impl Walk {
    fn new(start: State, budget_minutes: i64) -> Self {
        Self {
            state: start,
            time_left: budget_minutes,
            steps: Vec::new(),
        }
    }

    fn record(&mut self, duration_minutes: i64) {
        self.steps
            .push(PlanStep::new(self.state.clone(), duration_minutes));
        self.time_left -= duration_minutes;
    }
}

/// Drives one budgeted walk over the state space.
#[derive(Debug, Clone)]
pub struct SessionBuilder<'a> {
    scorer: TransitionScorer<'a>,
    dwell: DwellSampler<'a>,
    terminal: State,
}

impl<'a> SessionBuilder<'a> {
    /// Creates a builder. `terminal` must belong to the scorer's space.
    pub fn new(scorer: TransitionScorer<'a>, dwell: DwellSampler<'a>, terminal: State) -> Self {
        Self {
            scorer,
            dwell,
            terminal,
        }
    }

    /// Runs the walk for `request`.
    ///
    /// # Errors
    /// [`ConfigurationError::InvalidPolicy`] for a bad policy, checked before
    /// any sampling; any scorer or dwell error raised during the walk.
    pub fn build<R: Rng>(
        &self,
        request: &PlanRequest,
        rng: &mut R,
    ) -> Result<Session, ConfigurationError> {
        let policy = &request.policy;
        policy.validate()?;
        let terminal_section = self.terminal.section.as_str();
        let mut walk = Walk::new(request.start.clone(), request.budget_minutes);
        let mut phase = Phase::Building;

        loop {
            phase = match phase {
                Phase::Building if walk.time_left <= 0 => Phase::Done,
                Phase::Building => {
                    let dwell = self.dwell.sample(&walk.state, rng)?.min(walk.time_left);
                    walk.record(dwell);

                    if walk.time_left <= 0 {
                        Phase::Done
                    } else if request.hard_end
                        && walk.time_left <= policy.hard_end_residual
                        && !walk.state.is_in_section(terminal_section)
                    {
                        Phase::ForceTerminal
                    } else {
                        walk.state = self.scorer.sample(&walk.state, walk.time_left, policy, rng)?;
                        Phase::Building
                    }
                }
                Phase::ForceTerminal => {
                    tracing::debug!(
                        from = %walk.state,
                        time_left = walk.time_left,
                        "hard end: forcing terminal state"
                    );
                    walk.state = self.terminal.clone();
                    Phase::Building
                }
                Phase::Done => break,
            };
        }

        let ends_in_terminal = walk
            .steps
            .last()
            .is_some_and(|s| s.state.is_in_section(terminal_section));
        if !ends_in_terminal {
            let top_up = policy.top_up_minutes(request.budget_minutes);
            tracing::debug!(top_up, "appending terminal top-up step");
            walk.steps.push(PlanStep::new(self.terminal.clone(), top_up));
        }

        let session = Session::new(walk.steps, request.budget_minutes);
        tracing::debug!(
            budget = request.budget_minutes,
            steps = session.len(),
            total = session.total_minutes(),
            "session planned"
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DwellRange, DwellTable, StateSpace, TransitionTable};
    use crate::planner::PlanPolicy;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    struct Fixture {
        space: StateSpace,
        sections: TransitionTable,
        modalities: TransitionTable,
        dwell: DwellTable,
    }

    impl Fixture {
        fn builder(&self) -> SessionBuilder<'_> {
            SessionBuilder::new(
                TransitionScorer::new(
                    &self.space,
                    &self.sections,
                    &self.modalities,
                    1.0,
                    "cooldown",
                    0.05,
                ),
                DwellSampler::new(&self.dwell),
                State::new("cooldown", "stretch"),
            )
        }
    }

    /// A walk that can never reach cooldown on its own.
    fn never_cools_down(dwell: DwellRange) -> Fixture {
        let sections = TransitionTable::new()
            .with_row("work", [("work", 1.0)])
            .with_row("cooldown", [("cooldown", 1.0)]);
        let modalities = TransitionTable::new()
            .with_row("strength", [("strength", 1.0)])
            .with_row("stretch", [("stretch", 1.0)]);
        let space = StateSpace::from_tables(&sections, &modalities).unwrap();
        Fixture {
            space,
            sections,
            modalities,
            dwell: DwellTable::new().with_default(dwell),
        }
    }

    #[test]
    fn test_budget_consumed_exactly_before_top_up() {
        let f = never_cools_down(DwellRange::new(4, 4));
        let req = PlanRequest::new(State::new("work", "strength"), 10).with_hard_end(false);
        let mut rng = SmallRng::seed_from_u64(1);
        let session = f.builder().build(&req, &mut rng).unwrap();

        let durations: Vec<i64> = session.steps.iter().map(|s| s.duration_minutes).collect();
        // 4 + 4 + capped 2, then top-up max(2, 10/10) = 2.
        assert_eq!(durations, vec![4, 4, 2, 2]);
        assert!(session.ends_in("cooldown"));
        assert_eq!(session.total_minutes(), 12);
    }

    #[test]
    fn test_hard_end_forces_terminal() {
        let f = never_cools_down(DwellRange::new(4, 4));
        let req = PlanRequest::new(State::new("work", "strength"), 10);
        let mut rng = SmallRng::seed_from_u64(1);
        let session = f.builder().build(&req, &mut rng).unwrap();

        // 4 (6 left) -> 4 (2 left, forced) -> cooldown capped 2.
        let states: Vec<&str> = session.steps.iter().map(|s| s.state.section.as_str()).collect();
        assert_eq!(states, vec!["work", "work", "cooldown"]);
        assert_eq!(session.last_step().unwrap().state, State::new("cooldown", "stretch"));
        assert_eq!(session.total_minutes(), 10);
    }

    #[test]
    fn test_hard_end_residual_is_configurable() {
        let f = never_cools_down(DwellRange::new(4, 4));
        let req = PlanRequest::new(State::new("work", "strength"), 10)
            .with_policy(PlanPolicy::default().with_hard_end_residual(6));
        let mut rng = SmallRng::seed_from_u64(1);
        let session = f.builder().build(&req, &mut rng).unwrap();
        let durations: Vec<i64> = session.steps.iter().map(|s| s.duration_minutes).collect();
        assert_eq!(durations, vec![4, 4, 2]);
        assert_eq!(session.steps[1].state.section, "cooldown");
    }

    #[test]
    fn test_zero_budget_yields_single_top_up() {
        let f = never_cools_down(DwellRange::new(3, 6));
        let req = PlanRequest::new(State::new("work", "strength"), 0);
        let mut rng = SmallRng::seed_from_u64(1);
        let session = f.builder().build(&req, &mut rng).unwrap();
        assert_eq!(
            session.steps,
            vec![PlanStep::new(State::new("cooldown", "stretch"), 2)]
        );
    }

    #[test]
    fn test_negative_budget_yields_single_top_up() {
        let f = never_cools_down(DwellRange::new(3, 6));
        let req = PlanRequest::new(State::new("work", "strength"), -15);
        let mut rng = SmallRng::seed_from_u64(1);
        let session = f.builder().build(&req, &mut rng).unwrap();
        assert_eq!(session.len(), 1);
        assert_eq!(session.total_minutes(), 2);
    }

    #[test]
    fn test_no_top_up_when_already_terminal() {
        let f = never_cools_down(DwellRange::new(5, 5));
        let req = PlanRequest::new(State::new("cooldown", "stretch"), 20);
        let mut rng = SmallRng::seed_from_u64(1);
        let session = f.builder().build(&req, &mut rng).unwrap();
        assert_eq!(session.total_minutes(), 20);
        assert!(session.steps.iter().all(|s| s.state.section == "cooldown"));
    }

    #[test]
    fn test_zero_top_up_divisor_is_rejected() {
        let f = never_cools_down(DwellRange::new(4, 4));
        let req = PlanRequest::new(State::new("work", "strength"), 10)
            .with_hard_end(false)
            .with_policy(PlanPolicy::default().with_top_up(0, 2));
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(matches!(
            f.builder().build(&req, &mut rng),
            Err(ConfigurationError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_invalid_dwell_range_surfaces_as_error() {
        let f = never_cools_down(DwellRange::new(6, 3));
        let req = PlanRequest::new(State::new("work", "strength"), 10);
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(matches!(
            f.builder().build(&req, &mut rng),
            Err(ConfigurationError::InvalidDwellRange { min: 6, max: 3, .. })
        ));
    }
}
