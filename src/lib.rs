//! Chroma Catch - A two-color reflex arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, boundary checks)
//! - `session`: Menu / playing / game-over state machine and frame scheduling
//! - `renderer`: Scene composition and the WebGPU pipeline
//! - `platform`: Browser/native collaborator seams (frames, presentation, storage)
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScoreStore;
pub use session::{Session, SessionPhase};
pub use settings::Settings;
pub use tuning::Tuning;

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Fallback viewport when the host can't report one (native/headless)
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 480.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 800.0;

    /// Frame delta clamp (ms) so a stalled tab doesn't teleport blocks
    pub const MAX_FRAME_MS: f64 = 50.0;

    /// Target frame period used by headless runs (~60 Hz)
    pub const HEADLESS_FRAME_MS: f64 = 1000.0 / 60.0;
}

/// Uniform sample in `[lo, hi]`.
///
/// A degenerate range (`hi <= lo`, e.g. a block wider than the viewport)
/// collapses to `lo` instead of panicking.
#[inline]
pub fn sample_range<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        lo
    }
}

/// Format a millisecond duration as seconds with 3 decimals (`"12.345"`)
#[inline]
pub fn format_seconds(ms: f64) -> String {
    format!("{:.3}", ms.max(0.0) / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "0.000");
        assert_eq!(format_seconds(1234.0), "1.234");
        assert_eq!(format_seconds(7000.0), "7.000");
        assert_eq!(format_seconds(-5.0), "0.000");
    }

    #[test]
    fn test_sample_range_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = sample_range(&mut rng, 28.0, 72.0);
            assert!((28.0..=72.0).contains(&v));
        }
    }

    #[test]
    fn test_sample_range_degenerate() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(sample_range(&mut rng, 10.0, 10.0), 10.0);
        assert_eq!(sample_range(&mut rng, 0.0, -30.0), 0.0);
    }
}
