//! Browser implementations of the engine's host capabilities.
//!
//! - `AnimationFrames`: `FrameRequester` over `requestAnimationFrame`
//! - `DocumentKeys`: `KeySource` over document `keydown`/`keyup` and window `blur`
//! - `acquire_context`: canvas id → 2d drawing surface

mod canvas;
mod frames;
mod keys;

pub use canvas::acquire_context;
pub use frames::AnimationFrames;
pub use keys::{DocumentKeys, DomSubscription};

use wasm_bindgen::{JsCast, JsValue};

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}
