// Browser smoke tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use neon_runner::{Phase, RunnerConfig, web};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, window};

wasm_bindgen_test_configure!(run_in_browser);

fn mount_canvas() {
    let doc = window().unwrap().document().unwrap();
    if doc.get_element_by_id("gameCanvas").is_some() {
        return;
    }
    let canvas: HtmlCanvasElement = doc.create_element("canvas").unwrap().dyn_into().unwrap();
    canvas.set_id("gameCanvas");
    canvas.set_width(600);
    canvas.set_height(200);
    doc.body().unwrap().append_child(&canvas).unwrap();
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn start_without_canvas_is_rejected() {
    if let Some(el) = window().unwrap().document().unwrap().get_element_by_id("gameCanvas") {
        el.remove();
    }
    assert!(neon_runner::start_game().is_err());
    assert!(!neon_runner::is_running());
}

#[wasm_bindgen_test]
fn start_stop_cycle() {
    mount_canvas();
    neon_runner::start_game_with_seed(1).unwrap();
    assert!(neon_runner::is_running());
    assert!(neon_runner::jump());
    assert!(neon_runner::shoot());
    neon_runner::stop_game();
    assert!(!neon_runner::is_running());
    assert_eq!(neon_runner::score_text(), "Score: 0");
    neon_runner::restart_game().unwrap();
}

#[wasm_bindgen_test]
async fn stop_cancels_the_interval() {
    mount_canvas();
    neon_runner::start_game_with_seed(5).unwrap();
    sleep(150).await;
    assert!(web::ticks() > 0, "interval never fired");

    neon_runner::stop_game();
    let ticks = web::ticks();
    let score = neon_runner::score_text();
    sleep(200).await;
    assert_eq!(web::ticks(), ticks);
    assert_eq!(neon_runner::score_text(), score);
    assert_eq!(web::phase(), Some(Phase::Idle));
}

#[wasm_bindgen_test]
async fn game_over_stops_ticking() {
    mount_canvas();
    // A spike every tick at speed 20 reaches the single-life player within
    // about 30 ticks.
    let cfg = RunnerConfig {
        start_lives: 1,
        obstacle_chance: 1.0,
        drone_chance: 0.0,
        obstacle_gap: 0.0,
        powerup_chance: 0.0,
        coin_chance: 0.0,
        start_speed: 20.0,
        ..RunnerConfig::default()
    };
    web::start(cfg, Some(9)).unwrap();
    sleep(1500).await;
    assert_eq!(web::phase(), Some(Phase::GameOver));
    assert!(!neon_runner::is_running());

    let ticks = web::ticks();
    sleep(200).await;
    assert_eq!(web::ticks(), ticks);
    neon_runner::restart_game().unwrap();
    assert_eq!(web::phase(), Some(Phase::Idle));
}
