//! Spikerun web host.
//!
//! Drives a page-supplied game object from the browser: one
//! `requestAnimationFrame` loop, one set of document key listeners, one 2d
//! canvas. The page loads the compiled simulation module first, then calls
//! `run(game)`.
//!
//! ```js
//! import init, { run } from "./spikerun_web.js";
//! await init();
//! run(new Game(), "gameCanvas");
//! ```

mod config;
mod game;
mod platform;
mod runtime;

pub use config::{WebConfig, DEFAULT_CANVAS_ID};
pub use game::{JsGame, JsSimulation};
pub use platform::{acquire_context, AnimationFrames, DocumentKeys, DomSubscription};
pub use runtime::launch;

use spikerun_engine::logging::{init_logging, LoggingConfig};
use spikerun_engine::sched::LoopStatus;
use wasm_bindgen::prelude::*;

/// Module entry point; runs once when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    init_logging(LoggingConfig::default());
    log::debug!("spikerun web host loaded");
}

/// Starts driving `game` against the canvas `canvas_id` (default
/// `gameCanvas`). Throws if startup fails or a session is already running.
#[wasm_bindgen]
pub fn run(game: JsGame, canvas_id: Option<String>) -> Result<(), JsValue> {
    let mut config = WebConfig::default();
    if let Some(id) = canvas_id {
        config.canvas_id = id;
    }

    launch(game, config).map_err(|e| {
        let e = anyhow::Error::new(e);
        log::error!("startup failed: {e:#}");
        JsValue::from_str(&format!("{e:#}"))
    })
}

/// `"idle"`, `"running"`, `"halted"`, or `undefined` before `run`.
#[wasm_bindgen(js_name = loopStatus)]
pub fn loop_status() -> Option<String> {
    runtime::status().map(|status| {
        match status {
            LoopStatus::Idle => "idle",
            LoopStatus::Running => "running",
            LoopStatus::Halted => "halted",
        }
        .to_string()
    })
}
