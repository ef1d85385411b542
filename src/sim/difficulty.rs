//! Time-based difficulty ramp

use crate::tuning::Tuning;

/// Fall speed and spawn cadence at a point in the run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Obstacle fall speed (px/s)
    pub fall_speed: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
}

/// Difficulty after `elapsed_ms` of play. Negative input is treated as 0.
pub fn difficulty(tuning: &Tuning, elapsed_ms: f64) -> Difficulty {
    let seconds = (elapsed_ms.max(0.0) / 1000.0) as f32;

    let ramp = (seconds * tuning.fall_speed_ramp).min(tuning.max_fall_speed_bonus);
    let fall_speed = tuning.base_fall_speed + ramp;
    let spawn_interval = (tuning.base_spawn_interval - seconds * tuning.spawn_interval_decay)
        .max(tuning.min_spawn_interval);

    Difficulty {
        fall_speed,
        spawn_interval,
    }
}
