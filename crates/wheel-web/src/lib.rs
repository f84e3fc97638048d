//! Browser bridge for the wheel engine.
//!
//! wasm-bindgen cannot export generic structs, so a single `WheelRunner`
//! lives in a `thread_local!` and the host talks to it through free
//! functions. Structured data crosses the boundary as JSON strings.

pub mod runner;

pub use runner::WheelRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<WheelRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner, or return `default` before `wheel_init`.
fn with_runner<T>(default: T, f: impl FnOnce(&mut WheelRunner) -> T) -> T {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            // The logger is installed by wheel_init, so go straight to the console.
            web_sys::console::warn_1(&JsValue::from_str(
                "wheel: not initialized, call wheel_init() first",
            ));
            default
        }
    })
}

/// Create the wheel. A zero seed draws one from `Math.random()`.
#[wasm_bindgen]
pub fn wheel_init(seed: u64) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let seed = if seed == 0 {
        (js_sys::Math::random() * u64::MAX as f64) as u64
    } else {
        seed
    };
    match WheelRunner::new(seed) {
        Ok(runner) => {
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("wheel: initialized");
        }
        Err(err) => log::error!("wheel: init failed: {}", err),
    }
}

/// Replace entries from a JSON array of `{id, text, color, weight?}`.
#[wasm_bindgen]
pub fn wheel_set_entries(json: &str) -> bool {
    with_runner(false, |r| r.set_entries_json(json))
}

/// Apply a JSON config object; missing fields take their defaults.
#[wasm_bindgen]
pub fn wheel_configure(json: &str) -> bool {
    with_runner(false, |r| r.configure_json(json))
}

#[wasm_bindgen]
pub fn wheel_spin() -> bool {
    with_runner(false, |r| r.spin())
}

#[wasm_bindgen]
pub fn wheel_tick(dt_seconds: f64) {
    with_runner((), |r| r.tick(dt_seconds));
}

#[wasm_bindgen]
pub fn wheel_rotation() -> f64 {
    with_runner(0.0, |r| r.rotation())
}

#[wasm_bindgen]
pub fn wheel_is_spinning() -> bool {
    with_runner(false, |r| r.is_spinning())
}

/// The completed spin as JSON, once. Empty string when nothing is pending.
#[wasm_bindgen]
pub fn wheel_take_winner() -> String {
    with_runner(String::new(), |r| r.take_winner_json())
}

/// Segment layout in wheel space, as JSON.
#[wasm_bindgen]
pub fn wheel_segments() -> String {
    with_runner(String::from("[]"), |r| r.segments_json())
}

/// `[x, y]` offset from the wheel center for a segment's label, at the
/// current rotation. Empty when `index` is out of range.
#[wasm_bindgen]
pub fn wheel_label_anchor(index: u32, radius: f64) -> Vec<f64> {
    with_runner(Vec::new(), |r| {
        r.label_anchor(index as usize, radius)
            .map(|xy| xy.to_vec())
            .unwrap_or_default()
    })
}

/// Segment under a screen angle (0 = pointer), or -1 for an empty wheel.
#[wasm_bindgen]
pub fn wheel_segment_at(screen_degrees: f64) -> i32 {
    with_runner(-1, |r| {
        r.segment_at_screen(screen_degrees)
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(-1)
    })
}
