//! Spikerun engine crate.
//!
//! Host-agnostic frame driver: frame timing, key-to-action dispatch and the
//! advance-then-draw call sequence for an externally owned simulation.
//! Platform crates supply the host capabilities (`FrameRequester`, `KeySource`).

pub mod core;
pub mod input;
pub mod sched;
pub mod session;
pub mod time;

pub mod logging;

#[cfg(test)]
mod test_support;
