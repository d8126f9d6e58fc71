//! Neon Runner core crate.
//!
//! A small endless-runner shown in a modal while the host page waits for an
//! image to be generated. The simulation lives in [`runner`] and is plain
//! Rust (testable natively); [`web`] binds it to the page's canvas, input
//! events and sound hook. The functions below are the page-facing API.

use wasm_bindgen::prelude::*;

#[macro_use]
mod console;

pub mod runner;
pub mod web;

pub use runner::{GameError, Hud, Phase, RunnerConfig, Session};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Page-facing entrypoints
// -----------------------------------------------------------------------------

/// Starts a new run on `#gameCanvas`, discarding any previous one.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(RunnerConfig::default(), None)
}

/// Like `start_game` with a fixed spawn seed (reproducible runs).
#[wasm_bindgen]
pub fn start_game_with_seed(seed: u64) -> Result<(), JsValue> {
    web::start(RunnerConfig::default(), Some(seed))
}

/// Starts a run from a JSON `RunnerConfig`; missing fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = RunnerConfig::from_json(json)?;
    web::start(cfg, None)
}

#[wasm_bindgen]
pub fn stop_game() {
    web::stop();
}

/// Leaves the game-over screen; the next `start_game` begins a new run.
#[wasm_bindgen]
pub fn restart_game() -> Result<(), JsValue> {
    web::restart()
}

#[wasm_bindgen]
pub fn jump() -> bool {
    web::apply(web::Command::Jump)
}

#[wasm_bindgen]
pub fn shoot() -> bool {
    web::apply(web::Command::Shoot)
}

/// "Score: N" as last published by the tick loop.
#[wasm_bindgen]
pub fn score_text() -> String {
    web::score_text()
}

#[wasm_bindgen]
pub fn is_running() -> bool {
    web::is_running()
}
