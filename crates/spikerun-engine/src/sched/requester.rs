use anyhow::Result;

/// Callback run by the host with the frame timestamp, in host units.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Host capability that runs a callback on the next animation frame.
pub trait FrameRequester {
    /// Current host timestamp, same unit and origin as the values passed to
    /// frame callbacks.
    fn now(&self) -> f64;

    /// Schedules `callback` for the next frame. One request, one invocation.
    fn request_frame(&self, callback: FrameCallback) -> Result<()>;
}
