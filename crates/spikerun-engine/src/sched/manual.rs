use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use anyhow::{bail, Result};

use super::requester::{FrameCallback, FrameRequester};

/// Deterministic frame host for headless runs and tests.
///
/// Mirrors animation-frame semantics: `step` runs every callback requested
/// before it, and callbacks requested during the step wait for the next one.
#[derive(Default)]
pub struct ManualFrames {
    now: Cell<f64>,
    pending: RefCell<VecDeque<FrameCallback>>,
    refuse: Cell<bool>,
}

impl ManualFrames {
    /// Host clock starts at `now`.
    pub fn new(now: f64) -> Self {
        Self {
            now: Cell::new(now),
            ..Self::default()
        }
    }

    /// Moves the host clock without delivering a frame.
    pub fn set_now(&self, now: f64) {
        self.now.set(now);
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Makes further `request_frame` calls fail, as a torn-down host would.
    pub fn refuse_requests(&self, refuse: bool) {
        self.refuse.set(refuse);
    }

    /// Delivers one frame at `timestamp`. Returns how many callbacks ran.
    pub fn step(&self, timestamp: f64) -> usize {
        self.now.set(timestamp);

        let due: Vec<FrameCallback> = self.pending.borrow_mut().drain(..).collect();
        let ran = due.len();
        for callback in due {
            callback(timestamp);
        }
        ran
    }

    /// Delivers one frame per timestamp, in order.
    pub fn run(&self, timestamps: &[f64]) {
        for &t in timestamps {
            self.step(t);
        }
    }
}

impl FrameRequester for ManualFrames {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn request_frame(&self, callback: FrameCallback) -> Result<()> {
        if self.refuse.get() {
            bail!("frame host refused the request");
        }
        self.pending.borrow_mut().push_back(callback);
        Ok(())
    }
}
