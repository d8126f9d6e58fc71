//! Browser glue: finds the page's canvas, drives `Session::tick` from a
//! fixed interval, maps keyboard / pointer input onto commands, mirrors the
//! score into `#gameScore` and forwards sound cues to the page's `playSound`.
use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, window};

use crate::runner::render::{Painter, Renderer, TextAlign};
use crate::runner::{GameError, Phase, RunnerConfig, Session, SimpleRng};

pub const CANVAS_ID: &str = "gameCanvas";
pub const SCORE_ID: &str = "gameScore";

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[wasm_bindgen]
extern "C" {
    // Provided by the host page; absent on pages without audio.
    #[wasm_bindgen(js_name = playSound, catch)]
    fn play_sound(name: &str) -> Result<(), JsValue>;
}

// --- Input mapping ----------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Jump,
    Shoot,
}

/// Keyboard mapping: Space jumps, F / Enter shoots.
pub fn command_for_key(code: &str, key: &str) -> Option<Command> {
    if code == "Space" {
        Some(Command::Jump)
    } else if matches!(key, "f" | "F" | "Enter") {
        Some(Command::Shoot)
    } else {
        None
    }
}

// --- Tick scheduling --------------------------------------------------------

/// A scheduled interval. Dropping the handle cancels it.
pub struct TickHandle {
    id: i32,
    active: bool,
    _callback: Closure<dyn FnMut()>,
}

impl TickHandle {
    fn schedule(interval_ms: i32) -> Result<Self, JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback = Closure::wrap(Box::new(on_tick) as Box<dyn FnMut()>);
        let id = win.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            interval_ms,
        )?;
        Ok(Self {
            id,
            active: true,
            _callback: callback,
        })
    }

    /// Clears the interval but keeps the closure alive; safe to call from
    /// inside the callback itself.
    pub fn cancel(&mut self) {
        if self.active {
            if let Some(w) = window() {
                w.clear_interval_with_handle(self.id);
            }
            self.active = false;
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

// --- Canvas painter ---------------------------------------------------------

struct CanvasPainter<'a>(&'a CanvasRenderingContext2d);

impl Painter for CanvasPainter<'_> {
    fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64) {
        self.0.set_fill_style_str(color);
        self.0.fill_rect(x, y, w, h);
    }

    fn fill_polygon(&mut self, color: &str, points: &[(f64, f64)]) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        self.0.set_fill_style_str(color);
        self.0.begin_path();
        self.0.move_to(x0, y0);
        for &(x, y) in rest {
            self.0.line_to(x, y);
        }
        self.0.close_path();
        self.0.fill();
    }

    fn fill_circle(&mut self, fill: &str, stroke: &str, cx: f64, cy: f64, r: f64) {
        self.0.begin_path();
        self.0.arc(cx, cy, r, 0.0, std::f64::consts::TAU).ok();
        self.0.set_fill_style_str(fill);
        self.0.fill();
        self.0.set_stroke_style_str(stroke);
        self.0.set_line_width(1.0);
        self.0.stroke();
    }

    fn stroke_line(&mut self, color: &str, width: f64, from: (f64, f64), to: (f64, f64)) {
        self.0.set_stroke_style_str(color);
        self.0.set_line_width(width);
        self.0.begin_path();
        self.0.move_to(from.0, from.1);
        self.0.line_to(to.0, to.1);
        self.0.stroke();
    }

    fn fill_text(&mut self, color: &str, font: &str, align: TextAlign, text: &str, x: f64, y: f64) {
        self.0.set_fill_style_str(color);
        self.0.set_font(font);
        self.0.set_text_align(align.as_css());
        self.0.fill_text(text, x, y).ok();
    }

    fn set_glow(&mut self, glow: Option<(&str, f64)>) {
        match glow {
            Some((color, blur)) => {
                self.0.set_shadow_color(color);
                self.0.set_shadow_blur(blur);
            }
            None => self.0.set_shadow_blur(0.0),
        }
    }
}

// --- Runtime state ----------------------------------------------------------

struct WebRunner {
    session: Session<SimpleRng>,
    renderer: Renderer,
    ctx: CanvasRenderingContext2d,
    score_el: Option<Element>,
    tick: Option<TickHandle>,
    sound_warned: bool,
}

impl WebRunner {
    fn draw(&mut self) {
        let mut painter = CanvasPainter(&self.ctx);
        self.renderer.draw_frame(&self.session, &mut painter);
    }

    fn flush_cues(&mut self) {
        for cue in self.session.drain_cues() {
            if let Err(err) = play_sound(cue.name()) {
                if !self.sound_warned {
                    console_warn!("runner: playSound unavailable ({:?}); muting cues", err);
                    self.sound_warned = true;
                }
            }
        }
    }

    fn publish_score(&self) {
        if let Some(el) = &self.score_el {
            el.set_text_content(Some(&self.session.hud().score_text()));
        }
    }

    fn halt(&mut self) {
        if let Some(handle) = self.tick.as_mut() {
            handle.cancel();
        }
    }
}

thread_local! {
    static RUNNER: RefCell<Option<WebRunner>> = RefCell::new(None);
    static INPUT_BOUND: Cell<bool> = Cell::new(false);
}

fn on_tick() {
    RUNNER.with(|cell| {
        // A tick that fires while another still holds the state is dropped.
        let Ok(mut guard) = cell.try_borrow_mut() else {
            return;
        };
        let Some(runner) = guard.as_mut() else {
            return;
        };
        if !runner.session.tick() {
            runner.halt();
            return;
        }
        runner.draw();
        runner.flush_cues();
        runner.publish_score();
        if !runner.session.is_running() {
            runner.halt();
        }
    });
}

fn with_runner<T>(f: impl FnOnce(&mut WebRunner) -> T) -> Option<T> {
    RUNNER.with(|cell| {
        let mut guard = cell.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

// --- Entry points -------------------------------------------------------------

/// Validates preconditions, builds a fresh session and schedules its ticks.
/// Any previous run (finished or not) is discarded. Refused while a tick or
/// input callback holds the runner (e.g. `playSound` calling back in).
pub fn start(cfg: RunnerConfig, seed: Option<u64>) -> Result<(), JsValue> {
    if RUNNER.with(|cell| cell.try_borrow_mut().is_err()) {
        return Err(JsValue::from_str("runner busy; start_game called from inside a tick"));
    }
    cfg.validate()?;
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("missing #gameCanvas element"))?
        .dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;
    let score_el = doc.get_element_by_id(SCORE_ID);

    bind_input(&doc, &canvas)?;

    let seed = seed.unwrap_or_else(seed_from_host);
    let tick_ms = cfg.tick_ms;
    let mut session = Session::with_config(cfg, SimpleRng::new(seed));
    session.start()?;
    // Scheduled before the runner is installed so a failure leaves no
    // half-started run behind.
    let handle = TickHandle::schedule(tick_ms)?;
    let runner = WebRunner {
        session,
        renderer: Renderer::new(seed.rotate_left(17)),
        ctx,
        score_el,
        tick: Some(handle),
        sound_warned: false,
    };
    runner.publish_score();

    // The previous runner (and its interval) is dropped after the slot is released.
    let previous = RUNNER
        .with(|cell| install(cell, runner))
        .map_err(|_| JsValue::from_str("runner busy; start_game called from inside a tick"))?;
    drop(previous);
    console_log!("runner: started seed={} tick={}ms", seed, tick_ms);
    Ok(())
}

/// Puts `value` into the slot and hands back the previous occupant, or gives
/// `value` back untouched when the slot is borrowed.
fn install<T>(cell: &RefCell<Option<T>>, value: T) -> Result<Option<T>, T> {
    match cell.try_borrow_mut() {
        Ok(mut slot) => Ok(slot.replace(value)),
        Err(_) => Err(value),
    }
}

pub fn stop() {
    with_runner(|r| {
        r.session.stop();
        r.halt();
    });
}

pub fn restart() -> Result<(), JsValue> {
    with_runner(|r| r.session.restart())
        .unwrap_or(Ok(()))
        .map_err(JsValue::from)
}

pub fn apply(cmd: Command) -> bool {
    with_runner(|r| {
        let applied = match cmd {
            Command::Jump => r.session.jump(),
            Command::Shoot => r.session.shoot(),
        };
        r.flush_cues();
        applied
    })
    .unwrap_or(false)
}

pub fn score_text() -> String {
    with_runner(|r| r.session.hud().score_text()).unwrap_or_else(|| "Score: 0".to_string())
}

pub fn is_running() -> bool {
    with_runner(|r| r.session.is_running()).unwrap_or(false)
}

/// Phase of the current run, `None` before the first start.
pub fn phase() -> Option<Phase> {
    with_runner(|r| r.session.phase())
}

/// Ticks simulated by the current run.
pub fn ticks() -> u64 {
    with_runner(|r| r.session.ticks()).unwrap_or(0)
}

fn bind_input(doc: &Document, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    if INPUT_BOUND.with(|b| b.get()) {
        return Ok(());
    }

    // Keyboard: Space = jump, F / Enter = shoot
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if !is_running() {
                return;
            }
            match command_for_key(&evt.code(), &evt.key()) {
                Some(Command::Jump) => {
                    evt.prevent_default();
                    apply(Command::Jump);
                }
                Some(cmd) => {
                    apply(cmd);
                }
                None => {}
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Pointer / touch on the canvas jumps
    for event in ["mousedown", "touchstart"] {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            apply(Command::Jump);
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    INPUT_BOUND.with(|b| b.set(true));
    Ok(())
}

fn seed_from_host() -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        if getrandom::getrandom(&mut buf).is_ok() {
            return u64::from_le_bytes(buf);
        }
    }
    let now = window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    ((now * 1000.0) as u64).wrapping_mul(1664525).wrapping_add(1013904223)
}
