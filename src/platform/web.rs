//! Browser binding
//!
//! [`WebGame`] is what the JavaScript presentation layer holds. It forwards
//! input into the session, runs ticks from animation-frame timestamps, and
//! starts the leaderboard flow without blocking the loop when a run ends.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::error::GatewayError;
use crate::persistence::local::LocalScoreStore;
use crate::persistence::rest::{RestScoreGateway, RestTableConfig};
use crate::persistence::{ScoreGateway, ScoreRecord, TOP_SCORES_LIMIT, fetch_leaderboard, submit_game_over};
use crate::session::{GameOverSummary, GameSession};
use crate::settings::{Avatar, Settings};
use crate::tuning::Tuning;

/// Score store picked at startup
enum WebStore {
    Remote(RestScoreGateway),
    Local(LocalScoreStore),
}

impl ScoreGateway for WebStore {
    async fn fetch_score(&self, nickname: &str) -> Result<Option<ScoreRecord>, GatewayError> {
        match self {
            WebStore::Remote(store) => store.fetch_score(nickname).await,
            WebStore::Local(store) => store.fetch_score(nickname).await,
        }
    }

    async fn insert_score(&self, nickname: &str, score: u64) -> Result<(), GatewayError> {
        match self {
            WebStore::Remote(store) => store.insert_score(nickname, score).await,
            WebStore::Local(store) => store.insert_score(nickname, score).await,
        }
    }

    async fn upsert_score(&self, nickname: &str, score: u64) -> Result<(), GatewayError> {
        match self {
            WebStore::Remote(store) => store.upsert_score(nickname, score).await,
            WebStore::Local(store) => store.upsert_score(nickname, score).await,
        }
    }

    async fn fetch_top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, GatewayError> {
        match self {
            WebStore::Remote(store) => store.fetch_top_scores(limit).await,
            WebStore::Local(store) => store.fetch_top_scores(limit).await,
        }
    }
}

struct Shared {
    session: GameSession,
    settings: Settings,
    last_time: f64,
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Flappy Mode starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    shared: Rc<RefCell<Shared>>,
    store: Rc<WebStore>,
}

#[wasm_bindgen]
impl WebGame {
    /// `remote_config` is a JSON `RestTableConfig`; without it scores stay in this browser.
    /// `tuning` is an optional JSON balance override.
    #[wasm_bindgen(constructor)]
    pub fn new(
        viewport_width: f32,
        remote_config: Option<String>,
        tuning: Option<String>,
    ) -> Result<WebGame, JsValue> {
        let tuning = match tuning {
            Some(json) => Tuning::from_json(&json).map_err(to_js)?,
            None => Tuning::default(),
        };
        let store = match remote_config {
            Some(json) => {
                let config = RestTableConfig::from_json(&json).map_err(to_js)?;
                log::info!("Leaderboard: remote table {}", config.table);
                WebStore::Remote(RestScoreGateway::new(config))
            }
            None => {
                log::info!("Leaderboard: LocalStorage");
                WebStore::Local(LocalScoreStore::default())
            }
        };

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut session = GameSession::new(seed, tuning).map_err(to_js)?;
        session.set_viewport_width(viewport_width);
        session.set_avatar(settings.avatar);
        log::info!("Game initialized with seed: {}", seed);

        Ok(WebGame {
            shared: Rc::new(RefCell::new(Shared {
                session,
                settings,
                last_time: 0.0,
            })),
            store: Rc::new(store),
        })
    }

    /// Name shown in the start screen's input
    pub fn player_name(&self) -> String {
        self.shared.borrow().settings.player_name.clone()
    }

    pub fn avatar(&self) -> String {
        self.shared.borrow().session.avatar().as_str().to_string()
    }

    pub fn set_avatar(&self, id: &str) {
        if let Some(avatar) = Avatar::from_str(id) {
            let mut shared = self.shared.borrow_mut();
            shared.session.set_avatar(avatar);
            shared.settings.avatar = avatar;
        }
    }

    /// Start a run. Errors carry the message to show the player.
    pub fn start(&self, name: &str) -> Result<(), JsValue> {
        let mut shared = self.shared.borrow_mut();
        shared.session.request_start(name).map_err(to_js)?;
        let name = shared.session.state().player_name.clone();
        shared.settings.player_name = name;
        shared.settings.save();
        shared.last_time = 0.0;
        Ok(())
    }

    pub fn jump(&self) {
        self.shared.borrow_mut().session.request_jump();
    }

    pub fn reset(&self) {
        let seed = js_sys::Date::now() as u64;
        self.shared.borrow_mut().session.request_reset(seed);
    }

    pub fn resize(&self, viewport_width: f32) {
        self.shared.borrow_mut().session.set_viewport_width(viewport_width);
    }

    /// Advance from a `requestAnimationFrame` timestamp (ms)
    pub fn frame(&self, time: f64) {
        let summary = {
            let mut shared = self.shared.borrow_mut();
            let dt = if shared.last_time > 0.0 {
                ((time - shared.last_time) / 1000.0) as f32
            } else {
                crate::consts::SIM_DT
            };
            shared.last_time = time;
            shared.session.update(dt)
        };
        if let Some(summary) = summary {
            self.spawn_game_over(summary);
        }
    }

    /// Current simulation state as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.shared.borrow().session.snapshot()).map_err(to_js)
    }

    /// Game-over report as JSON, once the store has answered
    pub fn report(&self) -> Result<Option<String>, JsValue> {
        let shared = self.shared.borrow();
        shared
            .session
            .last_report()
            .map(serde_json::to_string)
            .transpose()
            .map_err(to_js)
    }

    /// Top scores for the rankings page; resolves to a JSON array
    pub fn leaderboard(&self) -> js_sys::Promise {
        let store = self.store.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            let scores = fetch_leaderboard(store.as_ref(), TOP_SCORES_LIMIT)
                .await
                .map_err(to_js)?;
            let json = serde_json::to_string(&scores).map_err(to_js)?;
            Ok(JsValue::from_str(&json))
        })
    }

    /// Route taps, clicks and jump keys on the window into the game
    pub fn attach_input(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        {
            let shared = self.shared.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if matches!(event.key().as_str(), " " | "ArrowUp" | "w" | "W") {
                    event.prevent_default();
                    shared.borrow_mut().session.request_jump();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let shared = self.shared.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                shared.borrow_mut().session.request_jump();
            });
            window.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let shared = self.shared.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::TouchEvent| {
                shared.borrow_mut().session.request_jump();
            });
            window.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

impl WebGame {
    fn spawn_game_over(&self, summary: GameOverSummary) {
        let shared = self.shared.clone();
        let store = self.store.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let report = submit_game_over(store.as_ref(), &summary.nickname, summary.score).await;
            shared
                .borrow_mut()
                .session
                .accept_report(summary.run_id, report);
        });
    }
}

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}
