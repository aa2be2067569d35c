use anyhow::{anyhow, Result};
use spikerun_engine::core::StartupError;
use spikerun_engine::sched::{FrameCallback, FrameRequester};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Performance, Window};

use super::describe;

/// `requestAnimationFrame` host.
///
/// Every request wraps its callback in a one-shot closure that the JS side
/// frees after the call, so no closure outlives its frame.
pub struct AnimationFrames {
    window: Window,
    performance: Performance,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Result<Self, StartupError> {
        let performance = window
            .performance()
            .ok_or(StartupError::HostUnavailable("window.performance"))?;
        Ok(Self { window, performance })
    }
}

impl FrameRequester for AnimationFrames {
    /// Same clock and origin as the rAF timestamp argument.
    fn now(&self) -> f64 {
        self.performance.now()
    }

    fn request_frame(&self, callback: FrameCallback) -> Result<()> {
        let closure = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        self.window
            .request_animation_frame(closure.unchecked_ref())
            .map(|_| ())
            .map_err(|e| anyhow!("requestAnimationFrame failed: {}", describe(&e)))
    }
}
