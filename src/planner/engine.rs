//! The routine planner engine.
//!
//! Owns the validated configuration and the derived state space. Every
//! planning call borrows them read-only and keeps its walk state local, so
//! one engine can serve any number of independent calls.

use rand::Rng;

use super::{
    DwellSampler, PlanPolicy, PlanRequest, RoutineConfig, SessionBuilder, SessionSummary,
    TransitionScorer,
};
use crate::error::ConfigurationError;
use crate::models::{Session, State, StateSpace};
use crate::validation::validate_config;

/// Time-budgeted Markov session planner.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_routine::models::State;
/// use u_routine::planner::{PlanRequest, RoutinePlanner};
/// use u_routine::presets;
///
/// let planner = RoutinePlanner::new(presets::workout()).unwrap();
/// let request = PlanRequest::new(State::new("warmup", "mobility"), 30);
/// let mut rng = SmallRng::seed_from_u64(42);
///
/// let session = planner.build_session(&request, &mut rng).unwrap();
/// assert!(session.ends_in("cooldown"));
/// assert!((30..=33).contains(&session.total_minutes()));
/// ```
#[derive(Debug, Clone)]
pub struct RoutinePlanner {
    config: RoutineConfig,
    space: StateSpace,
}

impl RoutinePlanner {
    /// Validates `config` and derives the state space.
    ///
    /// # Errors
    /// [`ConfigurationError::EmptyAxis`] for an empty transition table,
    /// otherwise [`ConfigurationError::Invalid`] with every validation finding.
    pub fn new(config: RoutineConfig) -> Result<Self, ConfigurationError> {
        let space = StateSpace::from_tables(&config.section_transitions, &config.modality_transitions)?;
        validate_config(&config)?;
        tracing::debug!(
            sections = space.sections().len(),
            modalities = space.modalities().len(),
            alpha = config.alpha,
            "routine planner ready"
        );
        Ok(Self { config, space })
    }

    /// The configuration this planner was built from.
    pub fn config(&self) -> &RoutineConfig {
        &self.config
    }

    /// The derived state space.
    pub fn space(&self) -> &StateSpace {
        &self.space
    }

    /// All states, section-major.
    pub fn states(&self) -> &[State] {
        self.space.states()
    }

    /// The forced wind-down state.
    pub fn terminal_state(&self) -> State {
        self.config.terminal_state()
    }

    /// Transition scorer over this planner's configuration.
    pub fn scorer(&self) -> TransitionScorer<'_> {
        TransitionScorer::new(
            &self.space,
            &self.config.section_transitions,
            &self.config.modality_transitions,
            self.config.alpha,
            &self.config.terminal_section,
            self.config.stickiness,
        )
    }

    /// Dwell sampler over this planner's dwell table.
    pub fn dwell_sampler(&self) -> DwellSampler<'_> {
        DwellSampler::new(&self.config.dwell)
    }

    /// Next-state probabilities from `current`, one per state.
    pub fn distribution(
        &self,
        current: &State,
        minutes_left: i64,
        policy: &PlanPolicy,
    ) -> Result<Vec<f64>, ConfigurationError> {
        self.space.require(current)?;
        policy.validate()?;
        self.scorer().distribution(current, minutes_left, policy)
    }

    /// Draws the next state from `current`.
    pub fn next_state<R: Rng>(
        &self,
        current: &State,
        minutes_left: i64,
        policy: &PlanPolicy,
        rng: &mut R,
    ) -> Result<State, ConfigurationError> {
        self.space.require(current)?;
        policy.validate()?;
        self.scorer().sample(current, minutes_left, policy, rng)
    }

    /// Draws an uncapped dwell time for `state`.
    pub fn dwell_time<R: Rng>(&self, state: &State, rng: &mut R) -> Result<i64, ConfigurationError> {
        self.dwell_sampler().sample(state, rng)
    }

    /// Generates one session.
    ///
    /// The session always ends in the terminal section. Its total is at least
    /// the budget and exceeds it by at most the top-up step.
    ///
    /// # Errors
    /// [`ConfigurationError::UnknownState`] for a start state outside the
    /// space and [`ConfigurationError::InvalidPolicy`] for a bad policy, both
    /// before any sampling.
    pub fn build_session<R: Rng>(
        &self,
        request: &PlanRequest,
        rng: &mut R,
    ) -> Result<Session, ConfigurationError> {
        validate_request(&self.space, request)?;
        SessionBuilder::new(self.scorer(), self.dwell_sampler(), self.terminal_state())
            .build(request, rng)
    }

    /// Summary metrics of a session produced by this planner.
    pub fn summarize(&self, session: &Session) -> SessionSummary {
        SessionSummary::calculate(session, &self.config.terminal_section)
    }
}

/// Checks a request against the state space before any sampling.
fn validate_request(space: &StateSpace, request: &PlanRequest) -> Result<(), ConfigurationError> {
    space.require(&request.start)?;
    request.policy.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DwellTable, TransitionTable};
    use crate::presets;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn planner() -> RoutinePlanner {
        RoutinePlanner::new(presets::workout()).unwrap()
    }

    fn start() -> State {
        State::new("warmup", "mobility")
    }

    #[test]
    fn test_state_space_size() {
        let p = planner();
        assert_eq!(p.states().len(), 3 * 6);
        assert_eq!(p.states()[0], start());
    }

    #[test]
    fn test_reference_scenario() {
        let p = planner();
        let req = PlanRequest::new(start(), 30);
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let s = p.build_session(&req, &mut rng).unwrap();
            assert!(s.ends_in("cooldown"), "seed {seed}: {:?}", s.last_step());
            let total = s.total_minutes();
            assert!((30..=33).contains(&total), "seed {seed}: total {total}");
            assert!(!s.steps_in_section("cooldown").is_empty());
        }
    }

    #[test]
    fn test_totals_bounded_without_hard_end() {
        let p = planner();
        for budget in [1, 7, 20, 45, 90] {
            let req = PlanRequest::new(start(), budget).with_hard_end(false);
            let top_up = req.policy.top_up_minutes(budget);
            for seed in 0..50 {
                let mut rng = SmallRng::seed_from_u64(seed);
                let s = p.build_session(&req, &mut rng).unwrap();
                assert!(!s.is_empty());
                assert!(s.ends_in("cooldown"));
                let total = s.total_minutes();
                assert!(total >= budget && total <= budget + top_up);
            }
        }
    }

    #[test]
    fn test_step_durations_respect_dwell_ranges() {
        let p = planner();
        let req = PlanRequest::new(start(), 60);
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let s = p.build_session(&req, &mut rng).unwrap();
            let summary = p.summarize(&s);
            let walk_len = if summary.top_up_applied { s.len() - 1 } else { s.len() };
            for (i, step) in s.steps[..walk_len].iter().enumerate() {
                let range = p.dwell_sampler().range_for(&step.state);
                assert!(step.duration_minutes >= 1 && step.duration_minutes <= range.max);
                // Only the step that exhausts the budget may be cut short.
                if i + 1 < walk_len {
                    assert!(range.contains(step.duration_minutes));
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_session() {
        let p = planner();
        let req = PlanRequest::new(start(), 45);
        let a = p.build_session(&req, &mut SmallRng::seed_from_u64(99)).unwrap();
        let b = p.build_session(&req, &mut SmallRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_planner_is_reusable() {
        let p = planner();
        let req = PlanRequest::new(start(), 30);
        let mut rng = SmallRng::seed_from_u64(5);
        let first = p.build_session(&req, &mut rng).unwrap();
        let _ = p.build_session(&PlanRequest::new(start(), 90), &mut rng).unwrap();
        // A fresh seed reproduces the first call regardless of what ran since.
        let again = p.build_session(&req, &mut SmallRng::seed_from_u64(5)).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_zero_budget_scenario() {
        let p = planner();
        let s = p
            .build_session(&PlanRequest::new(start(), 0), &mut SmallRng::seed_from_u64(0))
            .unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.steps[0].state, p.terminal_state());
        assert!(s.steps[0].duration_minutes >= 2);
    }

    #[test]
    fn test_unknown_start_state() {
        let p = planner();
        let req = PlanRequest::new(State::new("nap", "mobility"), 30);
        let err = p
            .build_session(&req, &mut SmallRng::seed_from_u64(0))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownState {
                section: "nap".into(),
                modality: "mobility".into()
            }
        );
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let p = planner();
        let req = PlanRequest::new(start(), 30)
            .with_policy(PlanPolicy::default().with_terminal_factors(-1.0, 4.0));
        assert!(matches!(
            p.build_session(&req, &mut SmallRng::seed_from_u64(0)),
            Err(ConfigurationError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_empty_tables_rejected() {
        let config = RoutineConfig::new(
            TransitionTable::new(),
            TransitionTable::new().with_row("stretch", [("stretch", 1.0)]),
        );
        assert_eq!(
            RoutinePlanner::new(config).unwrap_err(),
            ConfigurationError::EmptyAxis { axis: "section" }
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = presets::workout().with_alpha(2.0);
        assert!(matches!(
            RoutinePlanner::new(config),
            Err(ConfigurationError::Invalid(_))
        ));
    }

    #[test]
    fn test_all_zero_weights_still_plan() {
        let config = RoutineConfig::new(
            TransitionTable::new()
                .with_row("work", [("work", 0.0)])
                .with_row("cooldown", [("cooldown", 0.0)]),
            TransitionTable::new()
                .with_row("cardio", [("cardio", 0.0)])
                .with_row("stretch", [("stretch", 0.0)]),
        )
        .with_dwell(DwellTable::new());
        let p = RoutinePlanner::new(config).unwrap();
        let next = p
            .next_state(
                &State::new("work", "cardio"),
                20,
                &PlanPolicy::default(),
                &mut SmallRng::seed_from_u64(3),
            )
            .unwrap();
        assert!(p.space().contains(&next));

        let s = p
            .build_session(
                &PlanRequest::new(State::new("work", "cardio"), 25),
                &mut SmallRng::seed_from_u64(3),
            )
            .unwrap();
        assert!(s.ends_in("cooldown"));
    }

    #[test]
    fn test_distribution_covers_space() {
        let p = planner();
        let probs = p
            .distribution(&start(), 20, &PlanPolicy::default())
            .unwrap();
        assert_eq!(probs.len(), p.states().len());
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_dwell_time_uses_override() {
        let p = planner();
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..100 {
            let d = p.dwell_time(&State::new("work", "strength"), &mut rng).unwrap();
            assert!((4..=8).contains(&d));
        }
    }

    #[test]
    fn test_distribution_rejects_invalid_policy() {
        let p = planner();
        let policy = PlanPolicy::default().with_terminal_factors(0.1, f64::NAN);
        assert!(matches!(
            p.distribution(&start(), 2, &policy),
            Err(ConfigurationError::InvalidPolicy(_))
        ));
    }
}
