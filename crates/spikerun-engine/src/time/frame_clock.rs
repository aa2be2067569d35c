/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds. Never negative.
    pub dt: f64,

    /// Host timestamp sampled for this tick, in host units.
    pub now: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots from host timestamps.
///
/// Timestamps are in host units (milliseconds in a browser); `unit_scale`
/// converts them to seconds. A timestamp earlier than the previous one yields
/// a zero delta instead of a negative one.
///
/// An optional upper clamp keeps a long host stall (a backgrounded tab stops
/// animation frames entirely) from reaching the simulation as one huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    frame_index: u64,
    unit_scale: f64,
    dt_max: Option<f64>,
}

impl FrameClock {
    /// Creates an unclamped clock. `unit_scale` is host units per second.
    pub fn new(unit_scale: f64) -> Self {
        debug_assert!(unit_scale > 0.0);
        Self {
            last: None,
            frame_index: 0,
            unit_scale,
            dt_max: None,
        }
    }

    /// Creates a clock whose deltas never exceed `dt_max` seconds.
    pub fn with_max_dt(unit_scale: f64, dt_max: f64) -> Self {
        debug_assert!(dt_max >= 0.0);
        Self {
            dt_max: Some(dt_max),
            ..Self::new(unit_scale)
        }
    }

    /// Sets the baseline the first delta is measured from.
    ///
    /// Call immediately before the first frame is requested. Without a
    /// baseline the first tick reports a zero delta.
    pub fn start(&mut self, now: f64) {
        self.last = Some(now);
    }

    pub fn is_started(&self) -> bool {
        self.last.is_some()
    }

    /// Advances the clock to `now` and returns a new `FrameTime`.
    pub fn tick(&mut self, now: f64) -> FrameTime {
        let elapsed = self.last.map_or(0.0, |last| now - last);

        // `max` also maps NaN to zero.
        let mut dt = (elapsed / self.unit_scale).max(0.0);
        if let Some(dt_max) = self.dt_max {
            dt = dt.min(dt_max);
        }

        self.last = Some(now);

        let ft = FrameTime {
            dt,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    /// Millisecond host timestamps, no clamp.
    fn default() -> Self {
        Self::new(1000.0)
    }
}
