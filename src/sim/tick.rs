//! Per-frame simulation step
//!
//! Spawn, fall, then judge every block that has reached the boundary.

use glam::Vec2;
use rand::Rng;

use super::difficulty::difficulty;
use super::state::{ColorState, Obstacle, World};
use crate::sample_range;
use crate::tuning::Tuning;

/// Shortest spawn interval the accumulator will drain with.
/// A zero/negative interval from a bad override would never terminate.
const MIN_DRAIN_INTERVAL: f32 = 1.0e-3;

/// Result of one simulation step
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Run continues
    Running {
        /// Blocks spawned this step
        spawned: usize,
        /// Matching blocks cleared at the boundary this step
        cleared: usize,
    },
    /// A block reached the boundary with the wrong color. The run is over.
    Mismatch { obstacle: Obstacle },
}

/// Create one block fully above the visible area, fully inside horizontally
pub fn spawn_obstacle<R: Rng + ?Sized>(
    rng: &mut R,
    viewport_width: f32,
    tuning: &Tuning,
) -> Obstacle {
    let size = sample_range(rng, tuning.min_block_size, tuning.max_block_size);
    let x = sample_range(rng, 0.0, viewport_width - size);
    let color = if rng.random_bool(0.5) {
        ColorState::A
    } else {
        ColorState::B
    };

    Obstacle {
        pos: Vec2::new(x, -size),
        size,
        color,
    }
}

/// Accumulate `dt` seconds and spawn once per full `spawn_interval`.
/// Several spawns per call are expected on long frames or short intervals.
pub fn spawn_obstacles(world: &mut World, tuning: &Tuning, dt: f32, spawn_interval: f32) -> usize {
    let interval = spawn_interval.max(MIN_DRAIN_INTERVAL);
    let mut spawned = 0;

    world.spawn_timer += dt;
    while world.spawn_timer >= interval {
        world.spawn_timer -= interval;
        let obstacle = spawn_obstacle(&mut world.rng, world.viewport.width, tuning);
        world.obstacles.push(obstacle);
        spawned += 1;
    }

    spawned
}

/// Advance the world to `now_ms`.
///
/// `frame_dt_ms` is the real time since the previous frame; it is clamped to
/// `[0, tuning.max_frame_ms]`. Elapsed run time is always recomputed from
/// `world.start_time_ms` so it never drifts.
pub fn step(world: &mut World, tuning: &Tuning, now_ms: f64, frame_dt_ms: f64) -> StepOutcome {
    let dt = (frame_dt_ms.clamp(0.0, tuning.max_frame_ms) / 1000.0) as f32;

    world.elapsed_ms = (now_ms - world.start_time_ms).max(0.0);
    let diff = difficulty(tuning, world.elapsed_ms);

    let spawned = spawn_obstacles(world, tuning, dt, diff.spawn_interval);

    let fall = diff.fall_speed * dt;
    for obstacle in &mut world.obstacles {
        obstacle.pos.y += fall;
    }

    // Reverse scan so removal never skips an element
    let boundary = world.boundary_y();
    let player_color = world.player.color;
    let mut cleared = 0;
    for i in (0..world.obstacles.len()).rev() {
        if world.obstacles[i].bottom() < boundary {
            continue;
        }
        if world.obstacles[i].color != player_color {
            return StepOutcome::Mismatch {
                obstacle: world.obstacles[i].clone(),
            };
        }
        world.obstacles.remove(i);
        cleared += 1;
    }

    if cleared > 0 {
        log::trace!("Cleared {} block(s) at {:.0}ms", cleared, world.elapsed_ms);
    }

    StepOutcome::Running { spawned, cleared }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Viewport;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world_with(viewport: Viewport) -> (World, Tuning) {
        let tuning = Tuning::default();
        (World::new(viewport, &tuning, 12345), tuning)
    }

    fn block_at(y: f32, size: f32, color: ColorState) -> Obstacle {
        Obstacle {
            pos: Vec2::new(50.0, y),
            size,
            color,
        }
    }

    #[test]
    fn test_ten_seconds_without_input() {
        // Tall enough that nothing reaches the bottom in 10s
        let (mut world, tuning) = world_with(Viewport::new(480.0, 100_000.0));
        let mut spawned = 0;
        let mut now = 0.0;
        for _ in 0..200 {
            now += 50.0;
            match step(&mut world, &tuning, now, 50.0) {
                StepOutcome::Running { spawned: s, cleared } => {
                    spawned += s;
                    assert_eq!(cleared, 0);
                }
                StepOutcome::Mismatch { .. } => panic!("nothing should reach the boundary"),
            }
        }
        assert!((world.elapsed_ms - 10_000.0).abs() < 1e-6);
        // Interval decays 0.95 -> 0.75 over the run
        assert!((10..=13).contains(&spawned), "spawned {}", spawned);
        assert_eq!(world.obstacles.len(), spawned);
    }

    #[test]
    fn test_mismatch_at_boundary_ends_run() {
        let (mut world, tuning) = world_with(Viewport::new(480.0, 800.0));
        world.elapsed_ms = 4_000.0;
        let size = 40.0;
        world.obstacles.push(block_at(800.0 - size, size, ColorState::B));

        let outcome = step(&mut world, &tuning, 4_016.0, 16.0);
        assert!(matches!(
            outcome,
            StepOutcome::Mismatch { ref obstacle } if obstacle.color == ColorState::B
        ));
        assert_eq!(world.elapsed_ms, 4_016.0);
    }

    #[test]
    fn test_match_at_boundary_clears_block() {
        let (mut world, tuning) = world_with(Viewport::new(480.0, 800.0));
        let size = 40.0;
        world.obstacles.push(block_at(100.0, size, ColorState::B));
        world.obstacles.push(block_at(800.0 - size, size, ColorState::A));

        let outcome = step(&mut world, &tuning, 16.0, 16.0);
        assert_eq!(
            outcome,
            StepOutcome::Running {
                spawned: 0,
                cleared: 1
            }
        );
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.obstacles[0].color, ColorState::B);
    }

    #[test]
    fn test_overshoot_is_still_judged() {
        let (mut world, tuning) = world_with(Viewport::new(480.0, 800.0));
        world.obstacles.push(block_at(900.0, 30.0, ColorState::B));
        assert!(matches!(
            step(&mut world, &tuning, 0.0, 0.0),
            StepOutcome::Mismatch { .. }
        ));
    }

    #[test]
    fn test_several_crossings_first_mismatch_wins() {
        let (mut world, tuning) = world_with(Viewport::new(480.0, 800.0));
        world.obstacles.push(block_at(790.0, 30.0, ColorState::B));
        world.obstacles.push(block_at(795.0, 30.0, ColorState::B));
        world.obstacles.push(block_at(799.0, 30.0, ColorState::A));

        match step(&mut world, &tuning, 0.0, 0.0) {
            StepOutcome::Mismatch { obstacle } => {
                // Scan runs newest first: the matching block is cleared, then
                // the newest mismatching one stops the run
                assert_eq!(obstacle.pos.y, 795.0);
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
        assert_eq!(world.obstacles.len(), 2);
    }

    #[test]
    fn test_all_matching_crossings_cleared() {
        let (mut world, tuning) = world_with(Viewport::new(480.0, 800.0));
        for y in [780.0, 785.0, 790.0] {
            world.obstacles.push(block_at(y, 30.0, ColorState::A));
        }
        let outcome = step(&mut world, &tuning, 0.0, 0.0);
        assert_eq!(
            outcome,
            StepOutcome::Running {
                spawned: 0,
                cleared: 3
            }
        );
        assert!(world.obstacles.is_empty());
    }

    #[test]
    fn test_frame_delta_is_clamped() {
        let (mut world, tuning) = world_with(Viewport::new(480.0, 100_000.0));
        world.obstacles.push(block_at(0.0, 30.0, ColorState::A));
        // A 2s stall only moves blocks 50ms worth
        step(&mut world, &tuning, 2_000.0, 2_000.0);
        let y = world.obstacles[0].pos.y;
        // Fall speed is evaluated at elapsed=2s: 180 + 40
        assert!((y - 220.0 * 0.05).abs() < 1e-3, "y = {}", y);
    }

    #[test]
    fn test_long_frame_spawns_multiple() {
        let (mut world, tuning) = world_with(Viewport::new(480.0, 800.0));
        let spawned = spawn_obstacles(&mut world, &tuning, 1.0, 0.22);
        assert_eq!(spawned, 4);
        assert!(world.spawn_timer < 0.22);
    }

    #[test]
    fn test_spawn_above_view() {
        let mut rng = Pcg32::seed_from_u64(3);
        let tuning = Tuning::default();
        for _ in 0..100 {
            let o = spawn_obstacle(&mut rng, 480.0, &tuning);
            assert_eq!(o.pos.y, -o.size);
            assert!((28.0..=72.0).contains(&o.size));
        }
    }

    #[test]
    fn test_spawn_colors_are_mixed() {
        let mut rng = Pcg32::seed_from_u64(11);
        let tuning = Tuning::default();
        let a = (0..200)
            .filter(|_| spawn_obstacle(&mut rng, 480.0, &tuning).color == ColorState::A)
            .count();
        assert!(a > 50 && a < 150, "A count {}", a);
    }

    proptest! {
        #[test]
        fn spawned_block_fits_horizontally(seed in any::<u64>(), width in 80.0f32..4000.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let o = spawn_obstacle(&mut rng, width, &Tuning::default());
            prop_assert!(o.pos.x >= 0.0);
            prop_assert!(o.pos.x + o.size <= width + 1e-3);
        }
    }
}
