//! Robo Tap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use robo_tap::render::CanvasRenderer;
    use robo_tap::sim::{SessionPhase, SessionState, TickInput, countdown_tick, tick};

    /// Game instance holding all state
    pub struct Game {
        state: SessionState,
        renderer: Option<CanvasRenderer>,
        input: TickInput,
        canvas: HtmlCanvasElement,
        /// Countdown interval handle, present while a session runs
        timer_handle: Option<i32>,
        /// Pending animation-frame handle, present while the frame loop runs
        raf_handle: Option<i32>,
    }

    thread_local! {
        /// Handle for host-page calls (overlay dismissal)
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Robo Tap starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // Without a rendering surface there is nothing to do
        let Some(el) = document.get_element_by_id("game-canvas") else {
            log::warn!("#game-canvas not found, game disabled");
            return Ok(());
        };
        let canvas: HtmlCanvasElement = el.dyn_into()?;

        resize_canvas(&canvas);

        let seed = js_sys::Date::now() as u64;
        let bounds = Vec2::new(canvas.width() as f32, canvas.height() as f32);
        let game = Rc::new(RefCell::new(Game {
            state: SessionState::new(seed, bounds),
            renderer: Some(CanvasRenderer::new(canvas.clone())?),
            input: TickInput::default(),
            canvas: canvas.clone(),
            timer_handle: None,
            raf_handle: None,
        }));
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        log::info!("Game initialized with seed: {seed}");

        show_instructions(&document);
        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_resize(game);

        Ok(())
    }

    /// Host-page force stop (overlay dismissed mid-session)
    pub fn force_stop() {
        let Some(game) = GAME.with(|slot| slot.borrow().clone()) else {
            return;
        };
        stop_session(&game);
    }

    /// Fit the canvas to its container, 3:2 logical aspect
    fn resize_canvas(canvas: &HtmlCanvasElement) {
        let Some(container) = canvas.parent_element() else {
            return;
        };
        let max_width = 600.0f64.min(container.client_width() as f64 - 40.0);
        if max_width <= 0.0 {
            return;
        }
        canvas.set_width(max_width as u32);
        canvas.set_height((max_width * 400.0 / 600.0) as u32);
    }

    fn start_session(game: &Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        {
            let mut g = game.borrow_mut();
            // Cancel any previous schedulers so exactly one loop chain runs
            clear_countdown(&mut g);
            cancel_frame(&mut g);
            let bounds = Vec2::new(g.canvas.width() as f32, g.canvas.height() as f32);
            g.state.set_bounds(bounds);
            g.state.start();
            g.input = TickInput::default();

            show_game(&document);
            set_text(&document, "score-value", &g.state.score.to_string());
            set_text(&document, "timer-value", &g.state.time_left.to_string());
        }

        start_countdown(game.clone());
        request_animation_frame(game.clone());
        log::info!("Session started");
    }

    fn stop_session(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            clear_countdown(&mut g);
            cancel_frame(&mut g);
            g.state.stop();
            g.input = TickInput::default();
        }
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            show_instructions(&document);
        }
        log::info!("Session stopped");
    }

    /// 1 Hz countdown driving the session clock
    fn start_countdown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let game_for_cb = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut g = game_for_cb.borrow_mut();
            countdown_tick(&mut g.state);

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            set_text(&document, "timer-value", &g.state.time_left.to_string());

            if g.state.phase == SessionPhase::Ended {
                clear_countdown(&mut g);
                cancel_frame(&mut g);
                set_text(&document, "final-score-value", &g.state.score.to_string());
                show_game_over(&document);
                log::info!("Time up, final score: {}", g.state.score);
            }
        });

        match window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                1000,
            ) {
            Ok(handle) => game.borrow_mut().timer_handle = Some(handle),
            Err(e) => log::warn!("Failed to start countdown: {e:?}"),
        }
        closure.forget();
    }

    fn clear_countdown(g: &mut Game) {
        if let Some(handle) = g.timer_handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }

    /// Cancel the pending frame callback, if any. Paired with the countdown
    /// cancellation so a stop halts both schedulers together.
    fn cancel_frame(g: &mut Game) {
        if let Some(handle) = g.raf_handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let game_for_cb = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game_for_cb);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => game.borrow_mut().raf_handle = Some(handle),
            Err(e) => log::warn!("Failed to schedule frame: {e:?}"),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            // This callback's handle is spent
            g.raf_handle = None;
            // Gate on session state as well; a stopped session ends the loop here
            if g.state.phase != SessionPhase::Running {
                return;
            }

            let input = std::mem::take(&mut g.input);
            tick(&mut g.state, &input);

            if let Some(renderer) = &g.renderer {
                if let Err(e) = renderer.render(&g.state) {
                    log::warn!("Render error: {e:?}");
                }
            }

            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_text(&document, "score-value", &g.state.score.to_string());
            }
        }

        request_animation_frame(game);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase != SessionPhase::Running {
                    return;
                }
                let point = to_canvas_space(
                    &canvas_clone,
                    event.client_x() as f32,
                    event.client_y() as f32,
                );
                g.input.taps.push(point);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase != SessionPhase::Running {
                    return;
                }
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let point = to_canvas_space(
                        &canvas_clone,
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                    );
                    g.input.taps.push(point);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Translate client coordinates to canvas-space using the displayed-size
    /// to logical-size scale factors
    fn to_canvas_space(canvas: &HtmlCanvasElement, client_x: f32, client_y: f32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        let scale_x = canvas.width() as f32 / rect.width() as f32;
        let scale_y = canvas.height() as f32 / rect.height() as f32;
        Vec2::new(
            (client_x - rect.left() as f32) * scale_x,
            (client_y - rect.top() as f32) * scale_y,
        )
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("game-start") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                start_session(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("game-restart") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                start_session(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            resize_canvas(&g.canvas);
            let bounds = Vec2::new(g.canvas.width() as f32, g.canvas.height() as f32);
            g.state.set_bounds(bounds);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // --- DOM panel helpers (all tolerate missing elements) -------------------

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            if hidden {
                let _ = el.set_attribute("hidden", "");
            } else {
                let _ = el.remove_attribute("hidden");
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show_instructions(document: &Document) {
        set_hidden(document, "game-instructions", false);
        set_hidden(document, "game-canvas", true);
        set_hidden(document, "game-score", true);
        set_hidden(document, "game-timer", true);
        set_hidden(document, "game-over", true);
    }

    fn show_game(document: &Document) {
        set_hidden(document, "game-instructions", true);
        set_hidden(document, "game-over", true);
        set_hidden(document, "game-canvas", false);
        set_hidden(document, "game-score", false);
        set_hidden(document, "game-timer", false);
    }

    fn show_game_over(document: &Document) {
        set_hidden(document, "game-canvas", true);
        set_hidden(document, "game-score", true);
        set_hidden(document, "game-timer", true);
        set_hidden(document, "game-over", false);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {e:?}");
    }
}

/// Called by the hosting page when the game overlay is dismissed
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_game() {
    wasm_game::force_stop();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use robo_tap::consts::SESSION_SECONDS;
    use robo_tap::sim::{SessionPhase, SessionState, TickInput, countdown_tick, tick};

    env_logger::init();
    log::info!("Robo Tap (native) starting...");
    log::info!("Rendering requires a browser - build with trunk for the web version");

    // Headless demo session: 60 frame ticks per countdown second
    let mut state = SessionState::new(42, Vec2::new(600.0, 400.0));
    state.start();
    for _ in 0..SESSION_SECONDS {
        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        countdown_tick(&mut state);
    }
    if state.phase != SessionPhase::Ended {
        log::warn!("Headless session did not reach time-up (phase {:?})", state.phase);
    }
    log::info!(
        "Headless session finished: {} robots live at time-up",
        state.robots.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
