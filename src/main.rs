//! Orb Siege entry point
//!
//! Handles platform-specific initialization. On the web the browser drives the
//! round through frame/interval callbacks; natively a headless round is played
//! by a simple auto-aim bot on a virtual clock.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

    use orb_siege::Tuning;
    use orb_siege::platform::{FrameId, TimerId, WebPlatform};
    use orb_siege::renderer::Canvas2d;
    use orb_siege::sim::Round;

    /// Game instance holding all state
    struct Game {
        round: Round,
        platform: WebPlatform,
        canvas: Canvas2d,
    }

    impl Game {
        fn on_frame(&mut self, id: FrameId) {
            let Game {
                round,
                platform,
                canvas,
            } = self;
            round.on_frame(id, platform, canvas);
        }

        fn on_timer(&mut self, id: TimerId) {
            let Game {
                round, platform, ..
            } = self;
            round.on_spawn_timer(id, platform);
        }

        fn start(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.round.start(seed, &mut self.platform);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Orb Siege starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas_el: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        fit_canvas(&window, &canvas_el);

        let ctx: CanvasRenderingContext2d = canvas_el
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let tuning = Tuning::from_override(canvas_el.get_attribute("data-tuning").as_deref());

        let game = Rc::new_cyclic(|weak: &Weak<RefCell<Game>>| {
            let frame_target = weak.clone();
            let timer_target = weak.clone();
            let platform = WebPlatform::new(
                window.clone(),
                document.clone(),
                Rc::new(move |id: FrameId| {
                    if let Some(game) = frame_target.upgrade() {
                        game.borrow_mut().on_frame(id);
                    }
                }),
                Rc::new(move |id: TimerId| {
                    if let Some(game) = timer_target.upgrade() {
                        game.borrow_mut().on_timer(id);
                    }
                }),
            );
            RefCell::new(Game {
                round: Round::new(tuning),
                platform,
                canvas: Canvas2d::new(ctx),
            })
        });

        setup_start_button(game.clone());
        setup_fire_input(game.clone());
        setup_resize(canvas_el);

        log::info!("Orb Siege ready");
    }

    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) {
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Don't let the start click also count as a shot
                event.stop_propagation();
                game.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_fire_input(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let target = Vec2::new(event.client_x() as f32, event.client_y() as f32);
            game.borrow_mut().round.fire(target);
        });
        let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: HtmlCanvasElement) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                fit_canvas(&window, &canvas);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
    log::info!("Orb Siege (native) starting...");
    log::info!("Native mode plays one headless round - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED);
    let final_score = headless::play(seed);
    println!("Final score: {}", final_score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use orb_siege::platform::{HeadlessPlatform, ScheduledEvent};
    use orb_siege::renderer::RecordingCanvas;
    use orb_siege::sim::Round;
    use orb_siege::{Tuning, Viewport};

    /// Frames between bot shots
    const FIRE_EVERY: u64 = 12;
    /// Hard stop (virtual milliseconds) in case the bot never loses
    const MAX_TIME_MS: f64 = 5.0 * 60.0 * 1000.0;

    /// Play one round with a bot that shoots the nearest enemy
    pub fn play(seed: u64) -> u64 {
        let mut platform = HeadlessPlatform::new(Viewport::new(1280.0, 720.0));
        let mut canvas = RecordingCanvas::new();
        let mut round = Round::new(Tuning::default());
        round.start(seed, &mut platform);

        let mut frames = 0u64;
        while let Some(event) = platform.next_event() {
            if platform.now_ms() > MAX_TIME_MS {
                log::warn!("Stopping after {} virtual seconds", MAX_TIME_MS / 1000.0);
                break;
            }
            if let ScheduledEvent::Frame(_) = event {
                frames += 1;
                if frames % FIRE_EVERY == 0 {
                    if let Some(target) = nearest_enemy(&round) {
                        round.fire(target);
                    }
                }
            }
            round.dispatch(event, &mut platform, &mut canvas);
            canvas.clear();
        }

        log::info!(
            "Round finished after {} frames ({:.1}s virtual)",
            frames,
            platform.now_ms() / 1000.0
        );
        round.score()
    }

    fn nearest_enemy(round: &Round) -> Option<glam::Vec2> {
        let state = round.state()?;
        let center = state.player.pos;
        state
            .enemies
            .iter()
            .min_by(|a, b| a.pos.distance(center).total_cmp(&b.pos.distance(center)))
            .map(|e| e.pos)
    }
}
