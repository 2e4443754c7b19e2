//! `#[wasm_bindgen]` exports for the browser host.
//!
//! The host calls `scene_init()` once, then `scene_tick(dt)` every display
//! frame, and reads the frame buffer directly from wasm memory through
//! `get_frame_ptr()` and the section offsets.

pub mod runner;

pub use runner::SceneRunner;

use std::cell::RefCell;

use tannenbaum::{InputEvent, Mode, TreeConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Scene not initialized. Call scene_init() first.");
        f(runner)
    })
}

#[wasm_bindgen]
pub fn scene_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    web_sys::console::time_with_label("tannenbaum: layout");
    let runner = SceneRunner::new(TreeConfig::default());
    web_sys::console::time_end_with_label("tannenbaum: layout");

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("tannenbaum: initialized");
}

#[wasm_bindgen]
pub fn scene_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Input ----

#[wasm_bindgen]
pub fn scene_toggle_mode() {
    with_runner(|r| r.push_input(InputEvent::ToggleMode));
}

/// 0 = assembled, anything else = dispersed.
#[wasm_bindgen]
pub fn scene_set_mode(code: u32) {
    let mode = if code == 0 { Mode::Assembled } else { Mode::Dispersed };
    with_runner(|r| r.push_input(InputEvent::SetMode(mode)));
}

#[wasm_bindgen]
pub fn scene_orbit(dx: f32, dy: f32) {
    with_runner(|r| r.push_input(InputEvent::Orbit { dx, dy }));
}

#[wasm_bindgen]
pub fn scene_zoom(delta: f32) {
    with_runner(|r| r.push_input(InputEvent::Zoom { delta }));
}

#[wasm_bindgen]
pub fn scene_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

/// Start a wish request. Returns `false` if one is already in flight.
/// The text arrives later; poll `is_wish_loading()` or watch the events buffer.
#[cfg(feature = "phrase")]
#[wasm_bindgen]
pub fn scene_request_wish() -> bool {
    let Some((ticket, service)) = with_runner(|r| r.begin_wish()) else {
        return false;
    };
    wasm_bindgen_futures::spawn_local(async move {
        let text = service.generate().await;
        with_runner(|r| r.finish_wish(ticket, text));
    });
    true
}

#[wasm_bindgen]
pub fn scene_dismiss_wish() {
    with_runner(|r| r.dismiss_wish());
}

// ---- Frame buffer accessors ----

#[wasm_bindgen]
pub fn get_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr())
}

#[wasm_bindgen]
pub fn get_frame_len() -> u32 {
    with_runner(|r| r.frame_len())
}

#[wasm_bindgen]
pub fn get_camera_offset() -> u32 {
    with_runner(|r| r.camera_offset())
}

#[wasm_bindgen]
pub fn get_topper_offset() -> u32 {
    with_runner(|r| r.topper_offset())
}

#[wasm_bindgen]
pub fn get_group_offset(index: u32) -> u32 {
    with_runner(|r| r.group_offset(index))
}

#[wasm_bindgen]
pub fn get_group_count(index: u32) -> u32 {
    with_runner(|r| r.group_count(index))
}

#[wasm_bindgen]
pub fn get_snow_offset() -> u32 {
    with_runner(|r| r.snow_offset())
}

#[wasm_bindgen]
pub fn get_snow_count() -> u32 {
    with_runner(|r| r.snow_count())
}

// ---- Events and UI state ----

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

#[wasm_bindgen]
pub fn get_wish_text() -> Option<String> {
    with_runner(|r| r.wish_text())
}

#[wasm_bindgen]
pub fn is_wish_loading() -> bool {
    with_runner(|r| r.is_wish_loading())
}

#[wasm_bindgen]
pub fn get_mode() -> u32 {
    with_runner(|r| r.mode())
}

#[wasm_bindgen]
pub fn get_progress() -> f32 {
    with_runner(|r| r.progress())
}

#[wasm_bindgen]
pub fn get_toggle_label() -> String {
    with_runner(|r| r.toggle_label().to_string())
}

#[wasm_bindgen]
pub fn get_wish_label() -> String {
    with_runner(|r| r.wish_label().to_string())
}

/// Static scene description (props, materials, lights, ambient points) as JSON.
#[wasm_bindgen]
pub fn get_scene_json() -> Result<String, JsValue> {
    with_runner(|r| r.scene_json()).map_err(|e| js_sys::Error::new(&e).into())
}
