//! Headless host: a manual frame clock plus a recording presenter
//!
//! Drives a session step by step without a real timer. Used by the native
//! binary and by tests.

use super::{FrameHandle, FrameScheduler, Presenter, Viewport, ViewportSource};
use crate::platform::storage::KeyValueStore;
use crate::renderer::Scene;
use crate::session::Session;

/// A presentation call, in the order it happened
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    Menu,
    Playing,
    GameOver {
        final_score: String,
        high_score: String,
    },
}

#[derive(Debug, Default)]
pub struct HeadlessHost {
    pub viewport: Viewport,
    /// Callback armed but not yet delivered
    pub pending: Option<FrameHandle>,
    /// Simulate a platform that cannot schedule frames
    pub refuse_frames: bool,
    pub frames_cancelled: u32,
    pub events: Vec<PresenterEvent>,
    pub frames_drawn: u32,
    pub last_scene: Option<Scene>,
    next_handle: i64,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Deliver the pending frame (if any) at `now_ms`.
    /// Returns false when nothing was armed.
    pub fn pump<S: KeyValueStore>(&mut self, session: &mut Session<S>, now_ms: f64) -> bool {
        match self.pending.take() {
            Some(handle) => {
                session.on_frame(handle, now_ms, self);
                true
            }
            None => false,
        }
    }

    /// Pump frames every `frame_ms` until the loop stops or `until_ms` passes.
    /// Returns the time of the last delivered frame.
    pub fn run_until<S: KeyValueStore>(
        &mut self,
        session: &mut Session<S>,
        mut now_ms: f64,
        frame_ms: f64,
        until_ms: f64,
    ) -> f64 {
        while now_ms + frame_ms <= until_ms {
            if !self.pump(session, now_ms + frame_ms) {
                break;
            }
            now_ms += frame_ms;
        }
        now_ms
    }
}

impl FrameScheduler for HeadlessHost {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        if self.refuse_frames {
            return None;
        }
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.frames_cancelled += 1;
        }
    }
}

impl Presenter for HeadlessHost {
    fn show_menu(&mut self) {
        self.events.push(PresenterEvent::Menu);
    }

    fn show_playing(&mut self) {
        self.events.push(PresenterEvent::Playing);
    }

    fn show_game_over(&mut self, final_score: &str, high_score: &str) {
        self.events.push(PresenterEvent::GameOver {
            final_score: final_score.to_string(),
            high_score: high_score.to_string(),
        });
    }

    fn draw(&mut self, scene: &Scene) {
        self.frames_drawn += 1;
        self.last_scene = Some(scene.clone());
    }
}

impl ViewportSource for HeadlessHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
