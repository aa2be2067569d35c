use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use anyhow::Result;

/// Capability set the driver needs from the game state.
///
/// The driver never looks inside the simulation. It steps it, draws it and
/// forwards discrete actions, always from the same thread.
pub trait Simulation {
    /// Rendering target handed to [`Simulation::draw`] on every tick.
    type Surface;

    /// Steps the simulation by `dt` seconds.
    fn advance(&mut self, dt: f64) -> Result<()>;

    /// Issues draw commands for the current state.
    fn draw(&mut self, surface: &Self::Surface) -> Result<()>;

    fn trigger_jump(&mut self);

    fn reset(&mut self);
}

/// Shared handle to the session's single simulation.
///
/// Both the frame loop and the key handler hold a clone. They run on one
/// thread and never overlap, so a borrow is never contended.
pub struct SimulationHandle<S>(Rc<RefCell<S>>);

impl<S> SimulationHandle<S> {
    pub fn new(simulation: S) -> Self {
        Self(Rc::new(RefCell::new(simulation)))
    }

    pub fn borrow(&self) -> Ref<'_, S> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, S> {
        self.0.borrow_mut()
    }

    /// True when both handles refer to the same simulation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<S> Clone for SimulationHandle<S> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}
