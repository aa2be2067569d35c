/// Fatal errors raised while bringing a session up.
///
/// Any of these aborts startup before the first frame is requested.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("no simulation provided; input cannot be wired before the simulation exists")]
    MissingSimulation,

    #[error("no drawing surface provided")]
    MissingSurface,

    #[error("no canvas element with id `{id}`")]
    SurfaceNotFound { id: String },

    #[error("canvas `{id}` has no 2d rendering context")]
    SurfaceUnavailable { id: String },

    #[error("host object unavailable: {0}")]
    HostUnavailable(&'static str),

    #[error("a session is already running")]
    AlreadyRunning,

    #[error("frame loop halted after a simulation failure and cannot be restarted")]
    LoopHalted,

    #[error("failed to subscribe to key events")]
    Subscribe(#[source] anyhow::Error),

    #[error("failed to request the first frame")]
    Schedule(#[source] anyhow::Error),
}
