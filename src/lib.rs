//! Time-budgeted activity planning for the U-Engine ecosystem.
//!
//! Generates randomized session plans by walking a composite Markov process
//! over a two-axis state space: a coarse *section* axis (warmup, work,
//! cooldown) and a fine *modality* axis (strength, cardio, stretch, ...).
//! Transitions blend both axes and react to the remaining time; every
//! session honors its budget and ends in the wind-down section.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TransitionTable`, `State`, `StateSpace`,
//!   `DwellRange`, `DwellTable`, `PlanStep`, `Session`
//! - **`planner`**: The engine — `RoutinePlanner`, `TransitionScorer`,
//!   `DwellSampler`, `SessionBuilder`, `SessionSummary`
//! - **`validation`**: Configuration integrity checks
//! - **`presets`**: Reference workout tables
//!
//! # Randomness
//!
//! The engine never touches global random state. Every sampling call takes
//! an `&mut impl Rng`, so a seeded generator reproduces sessions exactly.
//!
//! # References
//!
//! - Norris (1997), "Markov Chains", Ch. 1
//! - Kemeny & Snell (1976), "Finite Markov Chains"

pub mod error;
pub mod models;
pub mod planner;
pub mod presets;
pub mod validation;

pub use error::ConfigurationError;
