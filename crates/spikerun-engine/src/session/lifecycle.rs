use std::rc::Rc;

use crate::core::{Simulation, SimulationHandle, StartupError};
use crate::input::{ActionMap, InputDispatcher, KeySource};
use crate::sched::{FrameRequester, FrameScheduler, LoopStatus, SchedulerConfig};

/// Collects a session's collaborators, then runs the startup sequence.
///
/// ```rust,ignore
/// let session = SessionBuilder::new()
///     .simulation(game)
///     .surface(ctx)
///     .start(&keys, frames)?;
/// ```
pub struct SessionBuilder<S: Simulation> {
    simulation: Option<S>,
    surface: Option<S::Surface>,
    bindings: ActionMap,
    scheduler: SchedulerConfig,
}

impl<S: Simulation + 'static> SessionBuilder<S> {
    pub fn new() -> Self {
        Self {
            simulation: None,
            surface: None,
            bindings: ActionMap::default(),
            scheduler: SchedulerConfig::default(),
        }
    }

    pub fn simulation(mut self, simulation: S) -> Self {
        self.simulation = Some(simulation);
        self
    }

    pub fn surface(mut self, surface: S::Surface) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn bindings(mut self, bindings: ActionMap) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn scheduler_config(mut self, config: SchedulerConfig) -> Self {
        self.scheduler = config;
        self
    }

    /// Wires input, then starts the frame loop.
    ///
    /// Missing collaborators are reported before anything touches the host:
    /// no listener is registered and no frame is requested. If the loop fails
    /// to start, the already-wired listener is removed again.
    pub fn start<K, R>(self, keys: &K, frames: Rc<R>) -> Result<Session<S, K, R>, StartupError>
    where
        K: KeySource,
        R: FrameRequester + 'static,
    {
        let simulation = self.simulation.ok_or(StartupError::MissingSimulation)?;
        let surface = self.surface.ok_or(StartupError::MissingSurface)?;

        let handle = SimulationHandle::new(simulation);

        let mut dispatcher = InputDispatcher::new(handle.clone(), self.bindings);
        dispatcher.attach(keys).map_err(StartupError::Subscribe)?;

        let scheduler = FrameScheduler::new(handle.clone(), surface, frames, &self.scheduler);
        scheduler.start()?;

        log::info!("session started");
        Ok(Session {
            handle,
            dispatcher,
            scheduler,
        })
    }
}

impl<S: Simulation + 'static> Default for SessionBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// One wired input dispatcher and one frame loop over one simulation.
///
/// Dropping the session removes its key listener. Frames already requested
/// keep the loop alive on the host side.
pub struct Session<S: Simulation, K: KeySource, R> {
    handle: SimulationHandle<S>,
    dispatcher: InputDispatcher<S, K>,
    scheduler: FrameScheduler<S, R>,
}

impl<S, K, R> Session<S, K, R>
where
    S: Simulation + 'static,
    K: KeySource,
    R: FrameRequester + 'static,
{
    /// Re-runs the startup sequence. While the session is live this changes
    /// nothing: the dispatcher stays subscribed once and the loop keeps a
    /// single chain of frame callbacks.
    pub fn start(&mut self, keys: &K) -> Result<(), StartupError> {
        self.dispatcher.attach(keys).map_err(StartupError::Subscribe)?;
        self.scheduler.start()
    }

    pub fn simulation(&self) -> &SimulationHandle<S> {
        &self.handle
    }

    pub fn dispatcher(&self) -> &InputDispatcher<S, K> {
        &self.dispatcher
    }

    pub fn scheduler(&self) -> &FrameScheduler<S, R> {
        &self.scheduler
    }

    pub fn status(&self) -> LoopStatus {
        self.scheduler.status()
    }
}
