//! World state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::platform::Viewport;
use crate::tuning::Tuning;

/// The two colors a bar or block can be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorState {
    #[default]
    A,
    B,
}

impl ColorState {
    /// The other color
    pub fn flipped(self) -> Self {
        match self {
            ColorState::A => ColorState::B,
            ColorState::B => ColorState::A,
        }
    }
}

/// The player's catcher bar
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: ColorState,
}

impl Player {
    /// Centered horizontally, resting `player_bottom_margin` above the bottom edge
    pub fn new(viewport: Viewport, tuning: &Tuning) -> Self {
        let width = viewport.width * tuning.player_width_frac;
        let height = tuning.player_height;
        Self {
            pos: Vec2::new(
                (viewport.width - width) / 2.0,
                viewport.height - height - tuning.player_bottom_margin,
            ),
            size: Vec2::new(width, height),
            color: ColorState::A,
        }
    }

    pub fn toggle_color(&mut self) {
        self.color = self.color.flipped();
    }
}

/// A falling square block
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    /// Side length
    pub size: f32,
    pub color: ColorState,
}

impl Obstacle {
    /// Bottom edge y
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }
}

/// Everything the simulation mutates during a run
#[derive(Debug, Clone)]
pub struct World {
    pub viewport: Viewport,
    pub player: Player,
    /// Live blocks in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Milliseconds since the run started
    pub elapsed_ms: f64,
    /// Seconds accumulated toward the next spawn
    pub spawn_timer: f32,
    /// Clock reading when the run started
    pub start_time_ms: f64,
    /// Spawn randomness (persists across resets so runs differ)
    pub rng: Pcg32,
}

impl World {
    pub fn new(viewport: Viewport, tuning: &Tuning, seed: u64) -> Self {
        Self {
            viewport,
            player: Player::new(viewport, tuning),
            obstacles: Vec::new(),
            elapsed_ms: 0.0,
            spawn_timer: 0.0,
            start_time_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Replace the whole world with a fresh one for `viewport`.
    /// Only the RNG stream carries over.
    pub fn reset(&mut self, viewport: Viewport, tuning: &Tuning) {
        *self = Self {
            rng: self.rng.clone(),
            ..Self::new(viewport, tuning, 0)
        };
    }

    /// Boundary line obstacles are judged at
    #[inline]
    pub fn boundary_y(&self) -> f32 {
        self.viewport.height
    }
}
