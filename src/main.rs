//! Chroma Catch entry point
//!
//! Handles platform-specific initialization and wires the session to the
//! browser (or to the headless host on native).

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use chroma_catch::input::{InputEvent, KeyCode};
    use chroma_catch::platform::storage::LocalStorage;
    use chroma_catch::platform::{FrameHandle, FrameScheduler, Presenter, Viewport, ViewportSource};
    use chroma_catch::renderer::{RenderState, Scene};
    use chroma_catch::{HighScoreStore, Session, SessionPhase, Settings, Tuning};

    /// Browser collaborators: rAF clock, DOM panels, WebGPU canvas
    struct WebHost {
        window: web_sys::Window,
        document: web_sys::Document,
        canvas: HtmlCanvasElement,
        render_state: Option<RenderState>,
        /// Reused for every requestAnimationFrame
        frame_callback: Option<Closure<dyn FnMut(f64)>>,
        /// Id of the armed rAF, if any
        pending_id: Option<i32>,
    }

    impl WebHost {
        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        /// Match the backing store to the CSS size at device pixel ratio
        fn fit_canvas(&mut self) {
            let dpr = self.window.device_pixel_ratio();
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
        }
    }

    impl FrameScheduler for WebHost {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            let Some(ref callback) = self.frame_callback else {
                log::error!("Frame requested before callback was installed");
                return None;
            };
            match self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                Ok(id) => {
                    self.pending_id = Some(id);
                    Some(FrameHandle(id as i64))
                }
                Err(e) => {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                    None
                }
            }
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            if self.pending_id.map(|id| id as i64) == Some(handle.0) {
                let _ = self.window.cancel_animation_frame(handle.0 as i32);
                self.pending_id = None;
            }
        }
    }

    impl Presenter for WebHost {
        fn show_menu(&mut self) {
            self.set_hidden("menu", false);
            self.set_hidden("game-over", true);
        }

        fn show_playing(&mut self) {
            self.set_hidden("menu", true);
            self.set_hidden("game-over", true);
        }

        fn show_game_over(&mut self, final_score: &str, high_score: &str) {
            self.set_text("final-score", final_score);
            self.set_text("high-score", high_score);
            self.set_hidden("game-over", false);
        }

        fn draw(&mut self, scene: &Scene) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            self.set_text("hud-score", &scene.score_text);
            match scene.hint_text {
                Some(ref hint) => {
                    self.set_text("hud-hint", hint);
                    self.set_hidden("hud-hint", false);
                }
                None => self.set_hidden("hud-hint", true),
            }
        }
    }

    impl ViewportSource for WebHost {
        fn viewport(&self) -> Viewport {
            Viewport::new(
                self.canvas.client_width() as f32,
                self.canvas.client_height() as f32,
            )
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorage>,
        host: WebHost,
    }

    impl Game {
        fn now(&self) -> f64 {
            self.host
                .window
                .performance()
                .map(|p| p.now())
                .unwrap_or(0.0)
        }

        fn on_frame(&mut self, time: f64) {
            // The browser fired our only armed callback
            let Some(id) = self.host.pending_id.take() else {
                return;
            };
            self.session
                .on_frame(FrameHandle(id as i64), time, &mut self.host);
        }

        fn on_input(&mut self, event: InputEvent) {
            let now = self.now();
            self.session.handle_input(event, now, &mut self.host);
        }

        fn start(&mut self) {
            let now = self.now();
            self.session.start(now, &mut self.host);
        }

        fn toggle_contrast(&mut self) {
            let mut settings = self.session.settings().clone();
            settings.high_contrast = !settings.high_contrast;
            if let Err(e) = settings.save(&mut LocalStorage) {
                log::warn!("Settings not saved: {}", e);
            }
            self.session.set_settings(settings);
            let scene = self.session.scene();
            self.host.draw(&scene);
        }

        fn on_resize(&mut self) {
            self.host.fit_canvas();
            // Geometry follows on the next reset; repaint what we have
            if self.session.phase() != SessionPhase::Playing {
                let scene = self.session.scene();
                self.host.draw(&scene);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Chroma Catch starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let mut host = WebHost {
            window: window.clone(),
            document: document.clone(),
            canvas: canvas.clone(),
            render_state: None,
            frame_callback: None,
            pending_id: None,
        };
        host.fit_canvas();

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, canvas.width(), canvas.height())
            .await
            .expect("Failed to create device");
        host.render_state = Some(render_state);

        let store = LocalStorage;
        let tuning = Tuning::load(&store);
        let settings = Settings::load(&store);
        let seed = js_sys::Date::now() as u64;
        let viewport = host.viewport();
        let session = Session::new(HighScoreStore::new(store), tuning, settings, viewport, seed);

        let game = Rc::new(RefCell::new(Game { session, host }));
        log::info!("Game initialized with seed: {}", seed);

        // One rAF closure for the whole lifetime; it holds only a weak ref
        {
            let weak = Rc::downgrade(&game);
            let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                if let Some(game) = weak.upgrade() {
                    game.borrow_mut().on_frame(time);
                }
            });
            game.borrow_mut().host.frame_callback = Some(callback);
        }

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_resize(game.clone());

        {
            let mut g = game.borrow_mut();
            let Game { session, host } = &mut *g;
            session.show_menu(host);
        }

        log::info!("Chroma Catch running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer covers mouse, touch and pen
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                game.borrow_mut().on_input(InputEvent::PointerDown);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let key = KeyCode::from_code(&event.code());
                if key == KeyCode::Other {
                    return;
                }
                // Keep space from scrolling the page
                event.prevent_default();
                game.borrow_mut().on_input(InputEvent::KeyDown(key));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(document: &web_sys::Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handler();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");

        for id in ["start-btn", "restart-btn"] {
            let game = game.clone();
            on_click(&document, id, move || game.borrow_mut().start());
        }

        {
            let game = game.clone();
            on_click(&document, "menu-btn", move || {
                let mut g = game.borrow_mut();
                let Game { session, host } = &mut *g;
                session.show_menu(host);
            });
        }

        on_click(&document, "contrast-btn", move || {
            game.borrow_mut().toggle_contrast()
        });
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().on_resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use chroma_catch::consts::HEADLESS_FRAME_MS;
    use chroma_catch::platform::{HeadlessHost, MemoryStore, Viewport};
    use chroma_catch::{HighScoreStore, Session, Settings, Tuning, format_seconds};

    env_logger::init();
    log::info!("Chroma Catch (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for the web version");

    let seed = std::env::var("CHROMA_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5eed);

    let viewport = Viewport::default();
    let mut host = HeadlessHost::new(viewport);
    let mut session = Session::new(
        HighScoreStore::new(MemoryStore::new()),
        Tuning::default(),
        Settings::default(),
        viewport,
        seed,
    );

    session.show_menu(&mut host);
    session.start(0.0, &mut host);
    let end = host.run_until(&mut session, 0.0, HEADLESS_FRAME_MS, 120_000.0);

    println!(
        "Headless run (seed {}): {:?} after {}s, {} frames drawn, final score {}",
        seed,
        session.phase(),
        format_seconds(end),
        host.frames_drawn,
        session
            .final_score_ms()
            .map(|ms| format!("{}s", format_seconds(ms)))
            .unwrap_or_else(|| "-".to_string()),
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
