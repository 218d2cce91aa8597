//! Brick Breaker entry point
//!
//! On the web this wires the canvas, keyboard and start button to the engine
//! and drives it from `requestAnimationFrame`. Natively it runs the headless
//! host.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use brick_breaker::platform::{NoticeQueue, frame_then_notify};
    use brick_breaker::renderer::CanvasSurface;
    use brick_breaker::sim::ResetToken;
    use brick_breaker::{Engine, Host, Settings};

    /// Browser side of the engine's collaborators
    struct WebHost {
        game: Weak<RefCell<Game>>,
        upload_endpoint: String,
        /// Alerts block, so they wait until the frame has released the game
        notices: NoticeQueue,
    }

    impl Host for WebHost {
        fn upload(&mut self, image: String) {
            brick_breaker::upload::spawn_upload(self.upload_endpoint.clone(), image);
        }

        fn notify_game_over(&mut self, message: &str) {
            self.notices.push(message);
        }

        fn schedule_reset(&mut self, token: ResetToken, delay_ms: u32) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let game = self.game.clone();
            let callback = Closure::once_into_js(move || {
                if let Some(game) = game.upgrade() {
                    game.borrow_mut().engine.complete_win_reset(token);
                }
            });
            if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms as i32,
            ) {
                log::error!("Failed to schedule win reset: {:?}", e);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        engine: Engine,
        surface: CanvasSurface,
        host: WebHost,
    }

    impl Game {
        /// Run one frame and return the notices it queued
        fn frame(&mut self) -> Vec<String> {
            let Game {
                engine,
                surface,
                host,
            } = self;
            engine.frame(surface, host);
            host.notices.take()
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let surface = CanvasSurface::new(canvas).expect("Failed to get 2d context");
        let (width, height) = (surface.width(), surface.height());

        let game = Rc::new_cyclic(|weak| {
            RefCell::new(Game {
                engine: Engine::new(width, height, settings.clone()),
                surface,
                host: WebHost {
                    game: weak.clone(),
                    upload_endpoint: settings.upload_endpoint.clone(),
                    notices: NoticeQueue::default(),
                },
            })
        });

        log::info!("Game initialized on {}x{} canvas", width, height);

        setup_input_handlers(game.clone());
        setup_start_button(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().engine.key_down(&event.key());
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().engine.key_up(&event.key());
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        let Some(btn) = document.get_element_by_id("start-btn") else {
            log::error!("No start button found");
            return;
        };

        let button = btn.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if !game.borrow_mut().engine.start() {
                return;
            }

            // No in-app restart: swap the control for instructions
            let document = web_sys::window().unwrap().document().unwrap();
            if let Ok(notice) = document.create_element("h2") {
                notice.set_text_content(Some("Reload page to restart"));
                let _ = button.replace_with_with_node_1(&notice);
            }

            request_animation_frame(game.clone());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Runs forever once started; losing or winning never stops scheduling
    fn game_loop(game: Rc<RefCell<Game>>) {
        frame_then_notify(&*game, Game::frame, |message| {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        });
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
    use brick_breaker::Settings;
    use brick_breaker::consts::{SURFACE_HEIGHT, SURFACE_WIDTH};
    use brick_breaker::platform::HeadlessRunner;

    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the playable web version");

    let frames = std::env::var("BRICK_BREAKER_FRAMES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3600);

    let mut runner = HeadlessRunner::new(SURFACE_WIDTH, SURFACE_HEIGHT, Settings::load());
    let summary = runner.run(frames);

    log::info!(
        "Ran {} frames: {} bricks, {} rounds lost, {} rounds won, best score {}",
        summary.frames,
        summary.bricks_destroyed,
        summary.rounds_lost,
        summary.rounds_won,
        summary.best_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
