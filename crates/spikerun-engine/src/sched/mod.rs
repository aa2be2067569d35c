//! Frame scheduling.
//!
//! `FrameScheduler` owns the per-tick sequence (delta → advance → draw →
//! reschedule). Hosts provide a `FrameRequester`; `ManualFrames` is the
//! deterministic one used headless and in tests.

mod manual;
mod requester;
mod scheduler;

pub use manual::ManualFrames;
pub use requester::{FrameCallback, FrameRequester};
pub use scheduler::{FrameScheduler, LoopStatus, SchedulerConfig, TickFailurePolicy};
