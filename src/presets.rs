//! Reference configurations.
//!
//! Sample tables for documentation and tests. The engine never depends on
//! them; callers supply their own tables in production.

use crate::models::{DwellTable, State, TransitionTable};
use crate::planner::RoutineConfig;

/// Workout routine: warmup/work/cooldown x six modalities, `alpha = 0.6`,
/// winding down into `(cooldown, stretch)`.
pub fn workout() -> RoutineConfig {
    let sections = TransitionTable::new()
        .with_row("warmup", [("warmup", 0.1), ("work", 0.75), ("cooldown", 0.15)])
        .with_row("work", [("warmup", 0.05), ("work", 0.7), ("cooldown", 0.25)])
        .with_row("cooldown", [("warmup", 0.02), ("work", 0.01), ("cooldown", 0.97)]);

    let modalities = TransitionTable::new()
        .with_row(
            "mobility",
            [
                ("mobility", 0.4),
                ("yoga", 0.25),
                ("pilates", 0.2),
                ("strength", 0.05),
                ("cardio", 0.08),
                ("stretch", 0.02),
            ],
        )
        .with_row(
            "yoga",
            [
                ("mobility", 0.25),
                ("yoga", 0.4),
                ("pilates", 0.2),
                ("strength", 0.05),
                ("cardio", 0.08),
                ("stretch", 0.02),
            ],
        )
        .with_row(
            "pilates",
            [
                ("mobility", 0.2),
                ("yoga", 0.25),
                ("pilates", 0.4),
                ("strength", 0.05),
                ("cardio", 0.08),
                ("stretch", 0.02),
            ],
        )
        .with_row(
            "strength",
            [
                ("mobility", 0.08),
                ("yoga", 0.2),
                ("pilates", 0.2),
                ("strength", 0.4),
                ("cardio", 0.1),
                ("stretch", 0.02),
            ],
        )
        .with_row(
            "cardio",
            [
                ("mobility", 0.05),
                ("yoga", 0.1),
                ("pilates", 0.18),
                ("strength", 0.2),
                ("cardio", 0.45),
                ("stretch", 0.02),
            ],
        )
        .with_row(
            "stretch",
            [
                ("mobility", 0.15),
                ("yoga", 0.08),
                ("pilates", 0.02),
                ("strength", 0.03),
                ("cardio", 0.02),
                ("stretch", 0.7),
            ],
        );

    // ("mind", "breath") is outside this space and never sampled.
    let dwell = DwellTable::new()
        .with_range(State::new("work", "strength"), 4, 8)
        .with_range(State::new("work", "cardio"), 3, 6)
        .with_range(State::new("mind", "breath"), 2, 5)
        .with_range(State::new("cooldown", "stretch"), 3, 7);

    RoutineConfig::new(sections, modalities)
        .with_dwell(dwell)
        .with_alpha(0.6)
        .with_terminal("cooldown", "stretch")
}
