//! Session state machine
//!
//! Menu -> Playing -> GameOver, with Menu reachable from both. Owns the
//! world and the single pending frame callback. Only `Playing` keeps a
//! callback armed; every other transition cancels it.

use crate::format_seconds;
use crate::highscores::HighScoreStore;
use crate::input::{InputEvent, Intent, interpret};
use crate::platform::storage::KeyValueStore;
use crate::platform::{FrameHandle, Host, Viewport};
use crate::renderer::{Scene, compose};
use crate::settings::Settings;
use crate::sim::{StepOutcome, World, step};
use crate::tuning::Tuning;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Title screen (initial)
    #[default]
    Menu,
    /// Frames are running
    Playing,
    /// Run ended, final score on screen
    GameOver,
}

pub struct Session<S> {
    phase: SessionPhase,
    world: World,
    tuning: Tuning,
    settings: Settings,
    high_scores: HighScoreStore<S>,
    /// Best time in ms as of the last load/update
    high_score_ms: f64,
    /// Score of the run that just ended
    final_score_ms: Option<f64>,
    pending_frame: Option<FrameHandle>,
    last_frame_ms: f64,
}

impl<S: KeyValueStore> Session<S> {
    /// A session sitting in the menu with a freshly reset world
    pub fn new(
        high_scores: HighScoreStore<S>,
        tuning: Tuning,
        settings: Settings,
        viewport: Viewport,
        seed: u64,
    ) -> Self {
        let high_score_ms = high_scores.load();
        log::info!("High score on record: {}s", format_seconds(high_score_ms));

        Self {
            phase: SessionPhase::Menu,
            world: World::new(viewport, &tuning, seed),
            tuning,
            settings,
            high_scores,
            high_score_ms,
            final_score_ms: None,
            pending_frame: None,
            last_frame_ms: 0.0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access for hosts that need to seed a scenario
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn high_score_ms(&self) -> f64 {
        self.high_score_ms
    }

    pub fn final_score_ms(&self) -> Option<f64> {
        self.final_score_ms
    }

    pub fn high_scores(&self) -> &HighScoreStore<S> {
        &self.high_scores
    }

    /// True while a frame callback is armed
    pub fn is_scheduled(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Enter the menu: stop frames, reset the world, draw one idle frame.
    /// Safe to call repeatedly.
    pub fn show_menu<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.cancel_pending(host);
        if self.phase != SessionPhase::Menu {
            log::info!("Returning to menu");
        }
        self.phase = SessionPhase::Menu;
        self.final_score_ms = None;
        self.world.reset(host.viewport(), &self.tuning);
        host.show_menu();
        self.draw(host);
    }

    /// Start a run from the menu or game-over screen.
    /// Returns false (and does nothing) if a run is already going. If no
    /// frame can be scheduled the session drops back to the menu.
    pub fn start<H: Host + ?Sized>(&mut self, now_ms: f64, host: &mut H) -> bool {
        if self.phase == SessionPhase::Playing {
            return false;
        }

        self.cancel_pending(host);
        self.world.reset(host.viewport(), &self.tuning);
        self.world.start_time_ms = now_ms;
        self.last_frame_ms = now_ms;
        self.final_score_ms = None;
        self.phase = SessionPhase::Playing;

        log::info!(
            "Run started ({}x{})",
            self.world.viewport.width,
            self.world.viewport.height
        );

        host.show_playing();
        self.draw(host);
        self.arm_frame(host);
        true
    }

    /// Frame callback. Steps and draws while playing, then re-arms itself
    /// only if the run is still going. Stale handles are ignored.
    pub fn on_frame<H: Host + ?Sized>(&mut self, handle: FrameHandle, now_ms: f64, host: &mut H) {
        if self.pending_frame != Some(handle) {
            log::trace!("Ignoring stale frame {:?}", handle);
            return;
        }
        self.pending_frame = None;

        if self.phase != SessionPhase::Playing {
            return;
        }

        let frame_dt_ms = now_ms - self.last_frame_ms;
        self.last_frame_ms = now_ms;

        match step(&mut self.world, &self.tuning, now_ms, frame_dt_ms) {
            StepOutcome::Running { .. } => {
                self.draw(host);
                self.arm_frame(host);
            }
            StepOutcome::Mismatch { obstacle } => {
                log::debug!(
                    "{:?} block hit the line while bar was {:?}",
                    obstacle.color,
                    self.world.player.color
                );
                // Phase flips first so the last frame is drawn as game over
                self.end_run(host);
                self.draw(host);
            }
        }
    }

    /// Flip the bar's color. Only meaningful while playing.
    pub fn toggle_color(&mut self) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        self.world.player.toggle_color();
        true
    }

    /// Route a raw input event. Returns the intent that was acted on.
    pub fn handle_input<H: Host + ?Sized>(
        &mut self,
        event: InputEvent,
        now_ms: f64,
        host: &mut H,
    ) -> Option<Intent> {
        let intent = interpret(event, self.phase)?;
        match intent {
            Intent::ToggleColor => {
                self.toggle_color();
            }
            Intent::Start => {
                self.start(now_ms, host);
            }
            Intent::Menu => self.show_menu(host),
        }
        Some(intent)
    }

    /// Compose the current frame without drawing it
    pub fn scene(&self) -> Scene {
        compose(
            &self.world,
            self.phase,
            &self.settings,
            self.tuning.grid_spacing,
        )
    }

    fn end_run<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.cancel_pending(host);
        self.phase = SessionPhase::GameOver;

        let final_ms = self.world.elapsed_ms;
        self.final_score_ms = Some(final_ms);
        self.high_score_ms = self.high_scores.record(self.high_score_ms, final_ms);

        log::info!(
            "Game over: {}s (best {}s)",
            format_seconds(final_ms),
            format_seconds(self.high_score_ms)
        );

        host.show_game_over(
            &format!("Final Score: {}s", format_seconds(final_ms)),
            &format!("High Score: {}s", format_seconds(self.high_score_ms)),
        );
    }

    /// Keep the loop going, or fall back to the menu if the host can't
    fn arm_frame<H: Host + ?Sized>(&mut self, host: &mut H) {
        match host.request_frame() {
            Some(handle) => self.pending_frame = Some(handle),
            None => {
                log::warn!("Frame callback could not be scheduled, leaving run");
                self.show_menu(host);
            }
        }
    }

    fn cancel_pending<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(handle) = self.pending_frame.take() {
            host.cancel_frame(handle);
        }
    }

    fn draw<H: Host + ?Sized>(&self, host: &mut H) {
        host.draw(&self.scene());
    }
}
