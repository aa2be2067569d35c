//! Time subsystem.
//!
//! Turns host frame timestamps into per-tick deltas without reading a clock
//! itself, so the same code runs under `requestAnimationFrame` and under a
//! deterministic test stepper.
//! Intended usage:
//! - one `FrameClock` per frame loop
//! - `start(now)` right before the first frame is requested
//! - `tick(timestamp)` once per frame callback

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
