//! Beach Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, TouchEvent};

    use beach_dash::Settings;
    use beach_dash::audio::AudioManager;
    use beach_dash::consts::*;
    use beach_dash::renderer::DomRenderer;
    use beach_dash::sim::{CameraMode, GameState, TickInput, tick};

    /// Viewport width at or below which the touch controls show
    const MOBILE_BREAKPOINT: i32 = 768;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<DomRenderer>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::default();
            let mut state = GameState::new(seed);
            if settings.follow_camera {
                state.camera_mode = CameraMode::Follow;
            }
            Self {
                state,
                renderer: None,
                audio: AudioManager::new(settings.muted),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks and forward sim events to the audio layer
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                // The sim reads a snapshot; key handlers may flip flags
                // between frames but never mid-tick
                let input = self.input;
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                for event in self.state.events.drain(..) {
                    self.audio.handle_event(event);
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(renderer) = &mut self.renderer {
                renderer.render(&self.state);
            }
        }

        /// Update HUD elements outside the game container
        fn update_hud(&self, document: &Document) {
            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("fps") {
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                }
            }
        }

        /// First user gesture unmutes and starts the background loop
        fn on_first_interaction(&mut self) {
            if self.audio.muted() {
                self.audio.set_muted(false);
                update_mute_button(false);
            }
        }
    }

    fn update_mute_button(muted: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(btn) = document.get_element_by_id("mute-btn") {
            btn.set_text_content(Some(if muted { "\u{1F507}" } else { "\u{1F50A}" }));
        }
    }

    /// Show the on-screen touch buttons on narrow viewports
    fn update_touch_controls(document: &Document) {
        let Some(window) = web_sys::window() else { return };
        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0) as i32;
        if let Some(el) = document.get_element_by_id("touch-controls") {
            if width <= MOBILE_BREAKPOINT {
                let _ = el.class_list().remove_1("hidden");
            } else {
                let _ = el.class_list().add_1("hidden");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Beach Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed);
        log::info!("Game initialized with seed: {}", seed);

        match DomRenderer::new("game") {
            Ok(renderer) => game.renderer = Some(renderer),
            Err(err) => log::error!("Renderer init failed: {err:?}"),
        }

        let game = Rc::new(RefCell::new(game));

        setup_keyboard(game.clone());
        setup_touch_buttons(game.clone());
        setup_mute_button(game.clone());
        setup_resize(&document);
        update_touch_controls(&document);

        request_animation_frame(game);

        log::info!("Beach Dash running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.on_first_interaction();
                match event.code().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "Space" => g.input.jump = true,
                    "ArrowUp" => g.input.throw = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    "Space" => g.input.jump = false,
                    "ArrowUp" => g.input.throw = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let buttons: [(&str, fn(&mut TickInput, bool)); 4] = [
            ("btn-left", |input, held| input.left = held),
            ("btn-right", |input, held| input.right = held),
            ("btn-jump", |input, held| input.jump = held),
            ("btn-throw", |input, held| input.throw = held),
        ];

        for (id, apply) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.on_first_interaction();
                    apply(&mut g.input, true);
                });
                let _ = btn.add_event_listener_with_callback(
                    "touchstart",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    apply(&mut game.borrow_mut().input, false);
                });
                let _ = btn.add_event_listener_with_callback(
                    "touchend",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
        }
    }

    fn setup_mute_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let muted = game.borrow_mut().audio.toggle_muted();
                update_mute_button(muted);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(document: &Document) {
        let window = web_sys::window().unwrap();
        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            update_touch_controls(&document);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Beach Dash (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless smoke run: walk right and lob litter for ten seconds
#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use beach_dash::consts::SIM_DT;
    use beach_dash::sim::{GameState, TickInput, tick};

    let mut state = GameState::new(42);
    for t in 0u64..600 {
        let input = TickInput {
            right: true,
            jump: t % 90 == 0,
            throw: t % 120 == 0,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
    }

    log::info!(
        "Simulated {} ticks: score {}, {} items in flight",
        state.time_ticks,
        state.score,
        state.items.len()
    );
    println!("✓ Headless simulation completed");
}
