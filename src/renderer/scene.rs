//! Frame composition
//!
//! A pure function of world + phase. Never mutates the world.

use super::shapes;
use super::vertex::{Vertex, colors, fill_for};
use crate::format_seconds;
use crate::session::SessionPhase;
use crate::settings::Settings;
use crate::sim::World;

/// Control hint shown while playing
pub const CONTROL_HINT: &str = "Tap or press Space to switch color";

/// One composed frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Viewport the vertices are expressed in (px)
    pub width: f32,
    pub height: f32,
    pub clear_color: [f32; 4],
    /// Triangle list in pixel space, back to front
    pub vertices: Vec<Vertex>,
    /// Current survival time (`"3.142s"`)
    pub score_text: String,
    /// Present only while playing
    pub hint_text: Option<String>,
}

/// Build the frame for `world` as seen in `phase`
pub fn compose(
    world: &World,
    phase: SessionPhase,
    settings: &Settings,
    grid_spacing: f32,
) -> Scene {
    let viewport = world.viewport;
    let mut vertices = Vec::new();

    if settings.show_grid {
        vertices.extend(shapes::grid(
            viewport.width,
            viewport.height,
            grid_spacing,
            colors::GRID,
        ));
    }

    for obstacle in &world.obstacles {
        vertices.extend(shapes::outlined_rect(
            obstacle.pos,
            glam::Vec2::splat(obstacle.size),
            fill_for(obstacle.color, settings.high_contrast),
            colors::OUTLINE,
        ));
    }

    let player = &world.player;
    vertices.extend(shapes::outlined_rect(
        player.pos,
        player.size,
        fill_for(player.color, settings.high_contrast),
        colors::OUTLINE,
    ));

    let hint_text = (phase == SessionPhase::Playing && settings.show_hint)
        .then(|| CONTROL_HINT.to_string());

    Scene {
        width: viewport.width,
        height: viewport.height,
        clear_color: colors::BACKGROUND,
        vertices,
        score_text: format!("{}s", format_seconds(world.elapsed_ms)),
        hint_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Viewport;
    use crate::sim::{ColorState, Obstacle};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn world() -> World {
        let tuning = Tuning::default();
        let mut world = World::new(Viewport::new(200.0, 400.0), &tuning, 5);
        world.obstacles.push(Obstacle {
            pos: Vec2::new(20.0, 30.0),
            size: 40.0,
            color: ColorState::B,
        });
        world.elapsed_ms = 3141.6;
        world
    }

    #[test]
    fn test_score_text() {
        let scene = compose(&world(), SessionPhase::Playing, &Settings::default(), 40.0);
        assert_eq!(scene.score_text, "3.142s");
    }

    #[test]
    fn test_hint_only_while_playing() {
        let w = world();
        let settings = Settings::default();
        assert_eq!(
            compose(&w, SessionPhase::Playing, &settings, 40.0).hint_text.as_deref(),
            Some(CONTROL_HINT)
        );
        assert!(compose(&w, SessionPhase::Menu, &settings, 40.0).hint_text.is_none());
        assert!(compose(&w, SessionPhase::GameOver, &settings, 40.0).hint_text.is_none());
    }

    #[test]
    fn test_draw_order_and_counts() {
        let w = world();
        let no_grid = Settings {
            show_grid: false,
            ..Settings::default()
        };
        let scene = compose(&w, SessionPhase::Playing, &no_grid, 40.0);
        // One block + the bar, 30 vertices each
        assert_eq!(scene.vertices.len(), 60);
        assert_eq!(scene.vertices[0].color, fill_for(ColorState::B, false));
        assert_eq!(scene.vertices[30].color, fill_for(ColorState::A, false));

        let with_grid = compose(&w, SessionPhase::Playing, &Settings::default(), 40.0);
        assert!(with_grid.vertices.len() > 60);
    }

    #[test]
    fn test_high_contrast_palette() {
        let settings = Settings {
            high_contrast: true,
            show_grid: false,
            show_hint: true,
        };
        let scene = compose(&world(), SessionPhase::Menu, &settings, 40.0);
        assert_eq!(scene.vertices[0].color, colors::CONTRAST_B);
    }
}
