//! Platform abstraction layer
//!
//! The game core never touches the browser directly. It talks to these seams:
//! - Frame scheduling (requestAnimationFrame on web)
//! - Presentation (DOM panels + canvas)
//! - Viewport size
//! - Storage (LocalStorage on web)

pub mod headless;
pub mod storage;

pub use headless::{HeadlessHost, PresenterEvent};
pub use storage::{KeyValueStore, MemoryStore, StorageError};

use crate::renderer::Scene;

/// Drawable area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            crate::consts::DEFAULT_VIEWPORT_WIDTH,
            crate::consts::DEFAULT_VIEWPORT_HEIGHT,
        )
    }
}

/// Opaque id of a pending frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i64);

/// External frame clock
pub trait FrameScheduler {
    /// Arm exactly one future frame callback.
    /// `None` when the platform refused to schedule one.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    /// Deregister a pending callback; unknown handles are ignored
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Screen chrome and canvas output
pub trait Presenter {
    fn show_menu(&mut self);
    fn show_playing(&mut self);
    /// Texts are preformatted (`"Final Score: 1.234s"`, `"High Score: 5.000s"`)
    fn show_game_over(&mut self, final_score: &str, high_score: &str);
    /// Present one composed frame
    fn draw(&mut self, scene: &Scene);
}

/// Reports the current drawable size
pub trait ViewportSource {
    fn viewport(&self) -> Viewport;
}

/// Everything the session needs from its surroundings
pub trait Host: FrameScheduler + Presenter + ViewportSource {}

impl<T: FrameScheduler + Presenter + ViewportSource> Host for T {}
