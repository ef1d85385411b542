//! Data-driven game balance
//!
//! Defaults are the shipped balance. A developer override can be dropped into
//! storage as partial JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::platform::storage::KeyValueStore;

/// Balance and geometry knobs for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Difficulty ramp ===
    /// Fall speed at t=0 (px/s)
    pub base_fall_speed: f32,
    /// Fall speed gained per second survived (px/s per s)
    pub fall_speed_ramp: f32,
    /// Cap on the ramp's contribution (px/s)
    pub max_fall_speed_bonus: f32,
    /// Spawn interval at t=0 (s)
    pub base_spawn_interval: f32,
    /// Spawn interval lost per second survived
    pub spawn_interval_decay: f32,
    /// Spawn interval floor (s)
    pub min_spawn_interval: f32,

    // === Obstacles ===
    pub min_block_size: f32,
    pub max_block_size: f32,

    // === Player bar ===
    /// Bar width as a fraction of viewport width
    pub player_width_frac: f32,
    pub player_height: f32,
    /// Gap between the bar's bottom edge and the viewport bottom
    pub player_bottom_margin: f32,

    // === Frame pacing ===
    /// Largest frame delta fed into the simulation (ms)
    pub max_frame_ms: f64,

    // === Presentation ===
    /// Background grid period (px)
    pub grid_spacing: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_fall_speed: 180.0,
            fall_speed_ramp: 20.0,
            max_fall_speed_bonus: 460.0,
            base_spawn_interval: 0.95,
            spawn_interval_decay: 0.02,
            min_spawn_interval: 0.22,

            min_block_size: 28.0,
            max_block_size: 72.0,

            player_width_frac: 0.78,
            player_height: 22.0,
            player_bottom_margin: 48.0,

            max_frame_ms: crate::consts::MAX_FRAME_MS,

            grid_spacing: 40.0,
        }
    }
}

impl Tuning {
    /// Storage key for the developer override
    const STORAGE_KEY: &'static str = "chroma_catch_tuning";

    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load the override from storage, falling back to defaults
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning override: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStore;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_fall_speed": 250.0 }"#).unwrap();
        assert_eq!(tuning.base_fall_speed, 250.0);
        assert_eq!(tuning.min_spawn_interval, 0.22);
        assert_eq!(tuning.max_frame_ms, 50.0);
    }

    #[test]
    fn test_load_malformed_falls_back() {
        let mut store = MemoryStore::default();
        store.set(Tuning::STORAGE_KEY, "{ not json").unwrap();
        assert_eq!(Tuning::load(&store), Tuning::default());
    }

    #[test]
    fn test_load_missing_is_default() {
        let store = MemoryStore::default();
        assert_eq!(Tuning::load(&store), Tuning::default());
    }
}
