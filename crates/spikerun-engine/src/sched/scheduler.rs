use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};

use crate::core::{Simulation, SimulationHandle, StartupError};
use crate::time::{FrameClock, FrameTime};

use super::requester::FrameRequester;

/// What the loop does after `advance` or `draw` fails.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TickFailurePolicy {
    /// Log the error and stop requesting frames. The loop ends `Halted`.
    #[default]
    Halt,
    /// Log the error and keep requesting frames. Every failure is logged.
    SkipFrame,
}

/// Frame loop configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Host timestamp units per second (1000 for millisecond hosts).
    pub time_unit_scale: f64,

    /// Upper bound for a single delta, in seconds. `None` feeds the raw
    /// elapsed time.
    pub max_dt: Option<f64>,

    pub failure_policy: TickFailurePolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            time_unit_scale: 1000.0,
            max_dt: None,
            failure_policy: TickFailurePolicy::Halt,
        }
    }
}

impl SchedulerConfig {
    fn clock(&self) -> FrameClock {
        match self.max_dt {
            Some(dt_max) => FrameClock::with_max_dt(self.time_unit_scale, dt_max),
            None => FrameClock::new(self.time_unit_scale),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopStatus {
    /// Built, no frame requested yet.
    Idle,
    Running,
    /// Stopped after a failure; no further frames will be requested.
    Halted,
}

/// Control directive produced by a tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum TickControl {
    Continue,
    Halt,
}

struct LoopState<S: Simulation> {
    sim: SimulationHandle<S>,
    surface: S::Surface,
    clock: FrameClock,
    policy: TickFailurePolicy,
    status: LoopStatus,
    last_frame: Option<FrameTime>,
}

impl<S: Simulation> LoopState<S> {
    fn tick(&mut self, timestamp: f64) -> TickControl {
        if self.status != LoopStatus::Running {
            return TickControl::Halt;
        }

        let ft = self.clock.tick(timestamp);
        self.last_frame = Some(ft);

        let Err(err) = self.step(ft) else {
            return TickControl::Continue;
        };

        match self.policy {
            TickFailurePolicy::Halt => {
                log::error!("{err:#}");
                log::warn!("frame loop halted at frame {}", ft.frame_index);
                self.status = LoopStatus::Halted;
                TickControl::Halt
            }
            TickFailurePolicy::SkipFrame => {
                log::error!("{err:#}; skipping frame");
                TickControl::Continue
            }
        }
    }

    /// Advance strictly before draw, with the delta of this tick.
    fn step(&self, ft: FrameTime) -> Result<()> {
        let mut sim = self.sim.borrow_mut();
        sim.advance(ft.dt)
            .with_context(|| format!("advance failed at frame {}", ft.frame_index))?;
        sim.draw(&self.surface)
            .with_context(|| format!("draw failed at frame {}", ft.frame_index))
    }
}

/// Self-rescheduling frame loop.
///
/// Each frame callback computes the delta, advances the simulation, draws it
/// and requests the next frame. The requester is injected so the browser's
/// `requestAnimationFrame` and a deterministic stepper are interchangeable.
pub struct FrameScheduler<S: Simulation, R> {
    state: Rc<RefCell<LoopState<S>>>,
    requester: Rc<R>,
}

impl<S, R> FrameScheduler<S, R>
where
    S: Simulation + 'static,
    R: FrameRequester + 'static,
{
    pub fn new(
        sim: SimulationHandle<S>,
        surface: S::Surface,
        requester: Rc<R>,
        config: &SchedulerConfig,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(LoopState {
                sim,
                surface,
                clock: config.clock(),
                policy: config.failure_policy,
                status: LoopStatus::Idle,
                last_frame: None,
            })),
            requester,
        }
    }

    /// Sets the clock baseline and requests the first frame.
    ///
    /// Starting a running loop is a no-op, so a second start never creates a
    /// second chain of frame callbacks. A halted loop stays halted.
    pub fn start(&self) -> Result<(), StartupError> {
        {
            let mut state = self.state.borrow_mut();
            match state.status {
                LoopStatus::Running => {
                    log::debug!("frame loop already running; ignoring start");
                    return Ok(());
                }
                LoopStatus::Halted => return Err(StartupError::LoopHalted),
                LoopStatus::Idle => {}
            }

            state.clock.start(self.requester.now());
            state.status = LoopStatus::Running;
        }

        if let Err(err) = schedule(Rc::clone(&self.state), Rc::clone(&self.requester)) {
            self.state.borrow_mut().status = LoopStatus::Idle;
            return Err(StartupError::Schedule(err));
        }

        log::debug!("frame loop started");
        Ok(())
    }

    pub fn status(&self) -> LoopStatus {
        self.state.borrow().status
    }

    /// Timing of the most recent tick.
    pub fn last_frame(&self) -> Option<FrameTime> {
        self.state.borrow().last_frame
    }
}

fn schedule<S, R>(state: Rc<RefCell<LoopState<S>>>, requester: Rc<R>) -> Result<()>
where
    S: Simulation + 'static,
    R: FrameRequester + 'static,
{
    let host = Rc::clone(&requester);
    requester.request_frame(Box::new(move |timestamp: f64| on_frame(state, host, timestamp)))
}

fn on_frame<S, R>(state: Rc<RefCell<LoopState<S>>>, requester: Rc<R>, timestamp: f64)
where
    S: Simulation + 'static,
    R: FrameRequester + 'static,
{
    let control = state.borrow_mut().tick(timestamp);
    if control == TickControl::Halt {
        return;
    }

    if let Err(err) = schedule(Rc::clone(&state), requester) {
        log::error!("failed to request next frame: {err:#}");
        state.borrow_mut().status = LoopStatus::Halted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sched::ManualFrames;
    use crate::test_support::{close, Call, Recorder};

    fn scheduler(
        sim: Recorder,
        config: SchedulerConfig,
    ) -> (Rc<ManualFrames>, SimulationHandle<Recorder>, FrameScheduler<Recorder, ManualFrames>) {
        let frames = Rc::new(ManualFrames::new(0.0));
        let handle = SimulationHandle::new(sim);
        let sched = FrameScheduler::new(handle.clone(), "canvas", Rc::clone(&frames), &config);
        (frames, handle, sched)
    }

    #[test]
    fn scenario_deltas() {
        let (frames, sim, sched) = scheduler(Recorder::default(), SchedulerConfig::default());
        sched.start().unwrap();
        frames.run(&[16.0, 33.0, 50.0]);

        let dts = sim.borrow().advances();
        assert_eq!(dts.len(), 3);
        assert!(close(dts[0], 0.016));
        assert!(close(dts[1], 0.017));
        assert!(close(dts[2], 0.017));
    }

    #[test]
    fn advance_precedes_draw_each_tick() {
        let (frames, sim, sched) = scheduler(Recorder::default(), SchedulerConfig::default());
        sched.start().unwrap();
        frames.run(&[10.0, 30.0]);

        let calls = sim.borrow().calls.clone();
        assert_eq!(calls.len(), 4);
        assert!(matches!(calls[0], Call::Advance(dt) if close(dt, 0.010)));
        assert_eq!(calls[1], Call::Draw("canvas"));
        assert!(matches!(calls[2], Call::Advance(dt) if close(dt, 0.020)));
        assert_eq!(calls[3], Call::Draw("canvas"));
    }

    #[test]
    fn advance_gets_the_tick_delta() {
        let (frames, _sim, sched) = scheduler(Recorder::default(), SchedulerConfig::default());
        sched.start().unwrap();
        frames.step(40.0);
        let ft = sched.last_frame().unwrap();
        assert!(close(ft.dt, 0.040));
        assert_eq!(ft.now, 40.0);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn nothing_runs_before_start() {
        let (frames, sim, sched) = scheduler(Recorder::default(), SchedulerConfig::default());
        assert_eq!(frames.step(16.0), 0);
        assert!(sim.borrow().calls.is_empty());
        assert_eq!(sched.status(), LoopStatus::Idle);
    }

    #[test]
    fn first_delta_measured_from_start() {
        let (frames, sim, sched) = scheduler(Recorder::default(), SchedulerConfig::default());
        frames.set_now(90_000.0);
        sched.start().unwrap();
        frames.step(90_016.0);
        assert!(close(sim.borrow().advances()[0], 0.016));
    }

    #[test]
    fn one_request_per_tick() {
        let (frames, _sim, sched) = scheduler(Recorder::default(), SchedulerConfig::default());
        sched.start().unwrap();
        assert_eq!(frames.pending(), 1);
        for t in [16.0, 32.0, 48.0] {
            assert_eq!(frames.step(t), 1);
            assert_eq!(frames.pending(), 1);
        }
    }

    #[test]
    fn second_start_is_noop() {
        let (frames, sim, sched) = scheduler(Recorder::default(), SchedulerConfig::default());
        sched.start().unwrap();
        sched.start().unwrap();
        assert_eq!(frames.pending(), 1);
        frames.run(&[16.0, 32.0]);
        assert_eq!(sim.borrow().advances().len(), 2);
    }

    #[test]
    fn non_decreasing_timestamps_give_non_negative_deltas() {
        let (frames, sim, sched) = scheduler(Recorder::default(), SchedulerConfig::default());
        sched.start().unwrap();
        frames.run(&[0.0, 0.0, 5.0, 5.0, 1000.0]);
        assert!(sim.borrow().advances().iter().all(|dt| *dt >= 0.0));
    }

    #[test]
    fn backwards_timestamp_is_zero_delta() {
        let (frames, sim, sched) = scheduler(Recorder::default(), SchedulerConfig::default());
        frames.set_now(100.0);
        sched.start().unwrap();
        frames.step(80.0);
        assert_eq!(sim.borrow().advances(), vec![0.0]);
    }

    #[test]
    fn max_dt_applies() {
        let config = SchedulerConfig {
            max_dt: Some(0.1),
            ..SchedulerConfig::default()
        };
        let (frames, sim, sched) = scheduler(Recorder::default(), config);
        sched.start().unwrap();
        frames.step(2_000.0);
        assert_eq!(sim.borrow().advances(), vec![0.1]);
    }

    #[test]
    fn halt_policy_stops_after_failed_advance() {
        let (frames, sim, sched) = scheduler(Recorder::failing_advance(1), SchedulerConfig::default());
        sched.start().unwrap();
        frames.run(&[16.0, 32.0, 48.0]);

        assert_eq!(sched.status(), LoopStatus::Halted);
        assert_eq!(frames.pending(), 0);
        // Tick 1 aborted before draw; tick 2 never ran.
        assert_eq!(sim.borrow().calls.len(), 2);
        assert_eq!(sim.borrow().count(&Call::Draw("canvas")), 1);
    }

    #[test]
    fn halt_policy_stops_after_failed_draw() {
        let (frames, sim, sched) = scheduler(Recorder::failing_draw(0), SchedulerConfig::default());
        sched.start().unwrap();
        frames.run(&[16.0, 32.0]);

        assert_eq!(sched.status(), LoopStatus::Halted);
        assert_eq!(sim.borrow().advances().len(), 1);
        assert_eq!(sim.borrow().count(&Call::Draw("canvas")), 0);
    }

    #[test]
    fn halted_loop_refuses_restart() {
        let (frames, _sim, sched) = scheduler(Recorder::failing_advance(0), SchedulerConfig::default());
        sched.start().unwrap();
        frames.step(16.0);
        assert!(matches!(sched.start(), Err(StartupError::LoopHalted)));
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn skip_policy_keeps_running() {
        let config = SchedulerConfig {
            failure_policy: TickFailurePolicy::SkipFrame,
            ..SchedulerConfig::default()
        };
        let (frames, sim, sched) = scheduler(Recorder::failing_advance(1), config);
        sched.start().unwrap();
        frames.run(&[16.0, 32.0, 48.0]);

        assert_eq!(sched.status(), LoopStatus::Running);
        assert_eq!(frames.pending(), 1);
        assert_eq!(sim.borrow().advances().len(), 2);
        // The skipped frame still consumed its delta.
        assert!(close(sim.borrow().advances()[1], 0.016));
    }

    #[test]
    fn refused_first_request_is_startup_error() {
        let (frames, _sim, sched) = scheduler(Recorder::default(), SchedulerConfig::default());
        frames.refuse_requests(true);
        assert!(matches!(sched.start(), Err(StartupError::Schedule(_))));
        assert_eq!(sched.status(), LoopStatus::Idle);
    }

    #[test]
    fn refused_reschedule_halts() {
        let (frames, sim, sched) = scheduler(Recorder::default(), SchedulerConfig::default());
        sched.start().unwrap();
        frames.refuse_requests(true);
        frames.step(16.0);
        assert_eq!(sched.status(), LoopStatus::Halted);
        assert_eq!(sim.borrow().advances().len(), 1);
    }
}
