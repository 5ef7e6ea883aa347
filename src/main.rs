//! Gate Flyer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use gate_flyer::Settings;
    use gate_flyer::settings::Toggle;
    use gate_flyer::audio::AudioManager;
    use gate_flyer::renderer::{AssetPaths, CanvasRenderer};
    use gate_flyer::sim::{PhaseHooks, Simulation, Surface, autopilot, tick};

    /// Start/end/win overlays in the page
    struct Screens {
        document: Document,
    }

    impl Screens {
        fn set_shown(&self, id: &str, shown: bool) {
            let Some(el) = self.document.get_element_by_id(id) else {
                return;
            };
            let classes = el.class_list();
            let result = if shown {
                classes.add_1("show")
            } else {
                classes.remove_1("show")
            };
            if result.is_err() {
                log::warn!("Could not toggle screen #{}", id);
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    impl PhaseHooks for Screens {
        fn on_round_start(&mut self) {
            self.set_shown("start-screen", false);
            self.set_shown("end-screen", false);
            self.set_shown("win-screen", false);
        }

        fn on_ended(&mut self, score: u32) {
            self.set_text("end-score", &gate_flyer::renderer::shapes::score_label(score));
            self.set_shown("end-screen", true);
        }

        fn on_won(&mut self, score: u32) {
            self.set_text("win-score", &gate_flyer::renderer::shapes::score_label(score));
            self.set_shown("win-screen", true);
        }
    }

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        screens: Screens,
        settings: Settings,
        /// A frame callback is scheduled
        loop_running: bool,
    }

    impl Game {
        /// Hand pending events to the collaborators
        fn dispatch_events(&mut self) {
            for event in self.sim.take_events() {
                event.dispatch(&mut self.audio);
                event.dispatch(&mut self.screens);
            }
        }

        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.sim.snapshot(), self.settings.show_hitbox);
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            if width == 0 || height == 0 {
                return;
            }
            if let Some(renderer) = &self.renderer {
                renderer.resize(width, height);
            }
            self.sim.resize(width as f32, height as f32);
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn window_size() -> (u32, u32) {
        let Some(window) = web_sys::window() else {
            return (0, 0);
        };
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
        (dim(window.inner_width()), dim(window.inner_height()))
    }

    /// Route one activation command, restarting the frame loop if needed
    fn activate(game: &Rc<RefCell<Game>>) {
        let start_loop = {
            let mut g = game.borrow_mut();
            g.sim.activate(now_ms());
            g.dispatch_events();
            let start = g.sim.is_running() && !g.loop_running;
            if start {
                g.loop_running = true;
            }
            start
        };
        if start_loop {
            request_animation_frame(game.clone());
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Gate Flyer starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = window_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let renderer = CanvasRenderer::new(canvas.clone(), &AssetPaths::default());
        if renderer.is_none() {
            log::warn!("Canvas 2D context unavailable - rendering disabled");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            sim: Simulation::new(seed, Surface::new(width.max(1) as f32, height.max(1) as f32)),
            renderer,
            audio: AudioManager::new(&settings),
            screens: Screens {
                document: document.clone(),
            },
            settings,
            loop_running: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_resize(game.clone());

        // Draw the Ready frame behind the start screen
        game.borrow().render();

        log::info!("Gate Flyer ready!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        activate(&game);
                    }
                    "i" | "I" => {
                        let mut g = game.borrow_mut();
                        let on = g.settings.toggle(Toggle::Autopilot);
                        g.settings.save();
                        log::info!("Autopilot: {}", on);
                    }
                    "h" | "H" => {
                        let mut g = game.borrow_mut();
                        g.settings.toggle(Toggle::Hitbox);
                        g.settings.save();
                        g.render();
                    }
                    "m" | "M" => {
                        let mut g = game.borrow_mut();
                        let muted = g.settings.toggle(Toggle::Mute);
                        let settings = g.settings.clone();
                        g.audio.apply_settings(&settings);
                        settings.save();
                        log::info!("Muted: {}", muted);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                activate(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                activate(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = window_size();
            let mut g = game.borrow_mut();
            g.resize(width, height);
            if !g.loop_running {
                g.render();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::error!("requestAnimationFrame failed");
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();

            if g.settings.autopilot && autopilot::should_activate(&g.sim.snapshot()) {
                g.sim.activate(time);
            }
            tick(&mut g.sim, time);
            g.dispatch_events();
            g.render();

            // Stop scheduling once the round is over; the next activation restarts us
            g.loop_running = g.sim.is_running();
            g.loop_running
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gate_flyer::sim::{GameEvent, Simulation, Surface, autopilot, tick};

    env_logger::init();
    log::info!("Gate Flyer (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    // Headless demo round flown by the autopilot at 60 fps
    let mut sim = Simulation::new(seed, Surface::new(1280.0, 800.0));
    sim.activate(0.0);
    let frame_ms = 1000.0 / 60.0;
    let mut frame = 0u64;
    while sim.is_running() && frame < 10_000 {
        let now = frame as f64 * frame_ms;
        if autopilot::should_activate(&sim.snapshot()) {
            sim.activate(now);
        }
        tick(&mut sim, now);
        for event in sim.take_events() {
            if let GameEvent::Scored { score } = event {
                log::debug!("Frame {}: score {}", frame, score);
            }
        }
        frame += 1;
    }

    println!(
        "Seed {}: {:?} with score {} after {} frames",
        seed,
        sim.phase(),
        sim.round.score,
        frame
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
