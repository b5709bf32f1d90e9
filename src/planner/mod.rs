//! Time-budgeted session planning.
//!
//! Walks a composite Markov process over `(section, modality)` states. The
//! next state is drawn from a blend of section-level and modality-level
//! transition weights, adjusted by the remaining time; dwell times come from
//! per-state ranges; and the walk is shaped so every session ends in the
//! terminal (wind-down) section.
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use u_routine::models::State;
//! use u_routine::planner::{PlanPolicy, PlanRequest, RoutinePlanner};
//! use u_routine::presets;
//!
//! let planner = RoutinePlanner::new(presets::workout()).unwrap();
//! let request = PlanRequest::new(State::new("warmup", "mobility"), 45)
//!     .with_policy(PlanPolicy::default().with_t_trigger(10));
//!
//! let session = planner.build_session(&request, &mut SmallRng::seed_from_u64(7)).unwrap();
//! for (i, minutes, section, modality) in session.rows() {
//!     let _ = (i, minutes, section, modality);
//! }
//! ```
//!
//! # Components
//!
//! - [`TransitionScorer`]: blended, time-aware next-state distribution
//! - [`DwellSampler`]: per-state dwell draws
//! - [`SessionBuilder`]: the budgeted walk and wind-down guarantee
//! - [`RoutinePlanner`]: owns configuration, entry point for callers

mod builder;
mod config;
mod dwell;
mod engine;
mod scorer;
mod summary;

pub use builder::SessionBuilder;
pub use config::{PlanPolicy, PlanRequest, RoutineConfig};
pub use dwell::DwellSampler;
pub use engine::RoutinePlanner;
pub use scorer::TransitionScorer;
pub use summary::SessionSummary;
