//! Astro Drift entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use astro_drift::platform::InputEvent;
    use astro_drift::renderer::CanvasRenderer;
    use astro_drift::{GameConfig, Session, SessionStatus};

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: CanvasRenderer,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Astro Drift starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")?
            .ok_or("no canvas")?
            .dyn_into()?;

        // Canvas fills the window, as does the play area
        let width = window.inner_width()?.as_f64().unwrap_or(800.0) as u32;
        let height = window.inner_height()?.as_f64().unwrap_or(600.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let config = GameConfig::load(width as f32, height as f32);
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let renderer = CanvasRenderer::new(&canvas)?;

        let game = Rc::new(RefCell::new(Game { session, renderer }));

        setup_input_handlers(game.clone())?;
        request_animation_frame(game);

        log::info!("Astro Drift running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down: held controls and fire
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = InputEvent::from_keydown(&event.code(), event.repeat()) {
                    if event.code() == "Space" {
                        event.prevent_default();
                    }
                    game.borrow_mut().session.handle_input(input);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up: release held controls
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = InputEvent::from_keyup(&event.code()) {
                    game.borrow_mut().session.handle_input(input);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window; game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let status = {
            let mut g = game.borrow_mut();
            let Game { session, renderer } = &mut *g;
            match session.frame(time, renderer) {
                Ok(status) => status,
                Err(e) => {
                    log::warn!("Render error: {:?}", e);
                    session.status()
                }
            }
        };

        // Game over cancels the loop, and with it the spawner
        match status {
            SessionStatus::Running => request_animation_frame(game),
            SessionStatus::Over => log::info!("Astro Drift stopped"),
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
    env_logger::init();
    log::info!("Astro Drift (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build for the playable version");

    if let Err(e) = headless::run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted autopilot run with no display
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use astro_drift::consts::FRAME_MS;
    use astro_drift::platform::{Control, InputEvent};
    use astro_drift::renderer::{Frame, Renderer};
    use astro_drift::{ConfigError, GameConfig, Session, SessionStatus};

    /// Keeps the most recent frame for the summary
    #[derive(Default)]
    struct LastFrame(Option<Frame>);

    impl Renderer for LastFrame {
        type Error = std::convert::Infallible;

        fn draw(&mut self, frame: &Frame) -> Result<(), Self::Error> {
            self.0 = Some(frame.clone());
            Ok(())
        }
    }

    /// Two minutes of play at 60 Hz
    const DEMO_FRAMES: u32 = 60 * 120;

    pub fn run() -> Result<(), ConfigError> {
        let seed = std::env::args()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(12345);
        let mut session = Session::new(GameConfig::default(), seed)?;
        let mut screen = LastFrame::default();

        // Spin slowly and fire a steady stream
        session.handle_input(InputEvent::Press(Control::RotateRight));
        let mut frames = 0;
        let mut status = SessionStatus::Running;
        while frames < DEMO_FRAMES && status == SessionStatus::Running {
            if frames % 20 == 0 {
                session.handle_input(InputEvent::Fire);
            }
            status = match session.frame(frames as f64 * FRAME_MS, &mut screen) {
                Ok(status) => status,
                Err(never) => match never {},
            };
            frames += 1;
        }

        if let Some(frame) = &screen.0 {
            log::info!(
                "Demo ended after {} ticks ({:?}): {} asteroids, {} projectiles live",
                frame.tick,
                frame.phase,
                frame.asteroids.len(),
                frame.projectiles.len()
            );
        }
        Ok(())
    }
}
