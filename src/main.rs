//! Flappy Pipes entry point
//!
//! Handles platform-specific initialization and drives the game timers.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use flappy_pipes::Tuning;
    use flappy_pipes::consts::MAX_FRAME_MS;
    use flappy_pipes::platform::action_for_key;
    use flappy_pipes::platform::dom::{DomPresenter, read_layout};
    use flappy_pipes::sim::{Game, update};

    /// Game instance plus its presenter and frame clock
    struct App {
        game: Game,
        presenter: DomPresenter,
        last_time: f64,
    }

    impl App {
        /// Forward wall time since the previous frame to the timers
        fn frame(&mut self, time: f64) {
            if self.presenter.is_reloading() {
                return;
            }
            let elapsed = if self.last_time > 0.0 {
                (time - self.last_time).min(MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;
            update(&mut self.game, elapsed, &mut self.presenter);
        }
    }

    /// Tuning overrides from `<body data-tuning='{...}'>`, if any
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        let json = document
            .body()
            .and_then(|body| body.get_attribute("data-tuning"));
        match json {
            Some(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning overrides: {}", e);
                    Tuning::default()
                }
            },
            None => Tuning::default(),
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Flappy Pipes starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let layout = read_layout(&window, &document)?;
        let tuning = load_tuning(&document);
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(layout, tuning, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut presenter = DomPresenter::attach(&document)?;
        game.render_all(&mut presenter);

        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            presenter,
            last_time: 0.0,
        }));

        setup_input_handlers(&window, app.clone())?;
        request_animation_frame(app);

        log::info!("Flappy Pipes ready - press Enter to start");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if let Some(action) = action_for_key(&event.key()) {
                event.prevent_default();
                let mut a = app.borrow_mut();
                let App {
                    game, presenter, ..
                } = &mut *a;
                game.handle_action(action, presenter);
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flappy_pipes::consts::TICK_MS;
    use flappy_pipes::sim::{
        Action, BodyId, Game, KinematicBody, ObstaclePair, Presenter, update,
    };
    use flappy_pipes::{Layout, Tuning};

    /// Presenter that only logs lifecycle events
    #[derive(Default)]
    struct LogPresenter {
        pairs_created: u32,
        pairs_removed: u32,
        reload_requested: bool,
    }

    impl Presenter for LogPresenter {
        fn render(&mut self, _id: BodyId, _body: &KinematicBody) {}

        fn pair_created(&mut self, pair: &ObstaclePair) {
            self.pairs_created += 1;
            log::debug!("Pair {} enters, gap at {}px", pair.id, pair.upper.height());
        }

        fn pair_removed(&mut self, pair: &ObstaclePair) {
            self.pairs_removed += 1;
            log::debug!("Pair {} leaves", pair.id);
        }

        fn set_restart_visible(&mut self, visible: bool) {
            log::info!("Restart prompt {}", if visible { "shown" } else { "hidden" });
        }

        fn request_reload(&mut self) {
            self.reload_requested = true;
        }
    }

    /// Flap whenever the bird sinks below the center of the next gap
    fn autopilot(game: &Game) -> Option<Action> {
        let bird = &game.avatar;
        let gap = game.obstacles.template().gap;
        let target = game
            .obstacles
            .pairs()
            .iter()
            .find(|pair| pair.upper.right() > bird.body.left())
            .map(|pair| pair.upper.height() + gap.gap_height / 2.0)
            .unwrap_or(gap.ground_top / 2.0);

        let below_target = bird.body.center().y > target + bird.body.height() / 2.0;
        (below_target && bird.y_speed() > 0.0).then_some(Action::Jump)
    }

    /// Run autopilot games for `seconds` of simulated time each
    pub fn run(runs: u32, seconds: u32) {
        let seed = 2024;
        let mut game = match Game::new(Layout::default(), Tuning::default(), seed) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Invalid configuration: {}", e);
                return;
            }
        };
        let mut presenter = LogPresenter::default();
        let frames = seconds * 1000 / TICK_MS;

        for run in 0..runs {
            game.handle_action(Action::ToggleRun, &mut presenter);
            let mut survived = 0u32;
            for _ in 0..frames {
                if let Some(action) = autopilot(&game) {
                    game.handle_action(action, &mut presenter);
                }
                survived += update(&mut game, f64::from(TICK_MS), &mut presenter);
                if game.is_over() {
                    break;
                }
            }

            println!(
                "Run {}: {} after {:.2}s, {} pipe pairs spawned",
                run + 1,
                if game.is_over() { "crashed" } else { "survived" },
                survived as f32 * TICK_MS as f32 / 1000.0,
                presenter.pairs_created
            );

            // Toggle after a crash asks for a reload; there is no page here,
            // so re-initialize in place either way
            game.handle_action(Action::ToggleRun, &mut presenter);
            if presenter.reload_requested {
                log::info!("Reload requested after run {}", run + 1);
            }
            game.restart(seed + u64::from(run) + 1, &mut presenter);
            presenter = LogPresenter::default();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Pipes (native) starting...");
    log::info!("Native mode is a headless autopilot demo - build for wasm32 to play");

    headless::run(3, 30);
}
