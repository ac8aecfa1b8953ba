//! Grid Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use grid_snake::Settings;
    use grid_snake::renderer::{RenderState, frame};
    use grid_snake::session::Session;

    /// Browser shell around a play session
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        last_time: f64,
        /// Score last written to the DOM
        shown_score: Option<u32>,
    }

    impl Game {
        fn new(settings: Settings, seed: u64, canvas: HtmlCanvasElement) -> Self {
            Self {
                session: Session::new(settings, seed),
                render_state: None,
                canvas,
                last_time: 0.0,
                shown_score: None,
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = frame(self.session.state(), self.session.palette());
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
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
        }

        /// Update the score display when it changes
        fn update_hud(&mut self) {
            let score = self.session.state().score;
            if self.shown_score == Some(score) {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("count") {
                el.set_text_content(Some(&score.to_string()));
            }
            self.shown_score = Some(score);
        }

        /// Export the frame just drawn into the snapshot dialog
        fn show_snapshot(&self) {
            let url = match self.canvas.to_data_url() {
                Ok(url) => url,
                Err(e) => {
                    log::warn!("Snapshot failed: {:?}", e);
                    return;
                }
            };
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(img) = document.get_element_by_id("snapshot-image") {
                let _ = img.set_attribute("src", &url);
            }
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&self.session.state().score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("snapshot") {
                let _ = el.set_attribute("class", "");
            }
        }

        /// Start a new game and hide the snapshot dialog
        fn restart(&mut self) {
            self.session.restart();
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("snapshot"))
            {
                let _ = el.set_attribute("class", "hidden");
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Grid Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load(&canvas);

        // CSS size is the board; the backing store is scaled by pixel density
        let dpr = window.device_pixel_ratio();
        let board_px = settings.board_px();
        let size = (board_px as f64 * dpr).round() as u32;
        canvas.set_width(size);
        canvas.set_height(size);
        let _ = canvas.set_attribute(
            "style",
            &format!("width: {0}px; height: {0}px", board_px),
        );

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(settings, seed, canvas.clone())));

        log::info!("Game initialized with seed: {}", seed);

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

        let render_state = RenderState::new(surface, &adapter, size, size, board_px as f32).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_snapshot_dialog(game.clone());

        request_animation_frame(game);

        log::info!("Grid Snake running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            let key = event.key();
            let handled = match key.as_str() {
                "Enter" | " " if g.session.state().is_game_over() => {
                    g.restart();
                    true
                }
                _ => g.session.on_key(&key),
            };
            if handled {
                // Keep arrows and space from scrolling the page
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_snapshot_dialog(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("snapshot-close") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                0.0
            };
            g.last_time = time;

            g.session.update(dt_ms);
            g.render();
            g.update_hud();

            // Must run in the same frame as the render or the canvas reads back blank
            if g.session.take_snapshot_request() {
                g.show_snapshot();
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Grid Snake (native) starting...");
    log::info!("Native mode runs the simulation headless - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let max_ticks: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(5_000);
    let settings = grid_snake::Settings::load();
    let seed = args
        .next()
        .and_then(|a| a.parse().ok())
        .or(settings.seed)
        .unwrap_or(42);

    let summary = grid_snake::sim::autopilot::run(&settings, seed, max_ticks);
    println!(
        "seed {}: {} ticks ({:.1}s of play), score {}, length {}, {}",
        seed,
        summary.ticks,
        summary.play_ms as f64 / 1000.0,
        summary.score,
        summary.length,
        summary.ending
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
