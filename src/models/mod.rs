//! Planning domain models.
//!
//! Provides the data types the planner consumes and produces: axis
//! transition tables, the derived `(section, modality)` state space, dwell
//! ranges, and the generated session.
//!
//! # Domain Mappings
//!
//! | u-routine | Workout | Yoga class | Study block |
//! |-----------|---------|------------|-------------|
//! | Section | Warmup/Work/Cooldown | Centering/Flow/Savasana | Review/Focus/Recap |
//! | Modality | Strength/Cardio | Standing/Floor | Reading/Exercises |
//! | PlanStep | Set | Sequence | Pomodoro |
//! | Session | Workout | Class | Study session |

mod dwell;
mod session;
mod state;
mod transition;

pub use dwell::{DwellOverride, DwellRange, DwellTable};
pub use session::{PlanStep, Session};
pub use state::{State, StateSpace};
pub use transition::{TransitionRow, TransitionTable};
