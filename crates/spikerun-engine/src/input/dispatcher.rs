use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};

use crate::core::{Simulation, SimulationHandle};

use super::actions::{Action, ActionMap};
use super::state::InputState;
use super::types::InputEvent;

/// Callback a `KeySource` invokes for every input event.
pub type KeyHandler = Box<dyn FnMut(&InputEvent)>;

/// Host-side source of keyboard and focus events.
pub trait KeySource {
    /// Keeps the handler registered; dropping it unsubscribes.
    type Subscription;

    /// Registers `handler`. Every call adds one more listener, exactly as
    /// `addEventListener` does with a fresh closure.
    fn subscribe(&self, handler: KeyHandler) -> Result<Self::Subscription>;
}

struct DispatchState<S> {
    sim: SimulationHandle<S>,
    bindings: ActionMap,
    input: InputState,
}

impl<S: Simulation> DispatchState<S> {
    fn handle(&mut self, ev: &InputEvent) -> Option<Action> {
        let key = self.input.apply_event(ev)?;

        let Some(action) = self.bindings.action_for(key) else {
            log::trace!("ignoring unmapped key {key}");
            return None;
        };

        log::debug!("key {key} -> {action:?}");
        action.apply(&mut *self.sim.borrow_mut());
        Some(action)
    }
}

/// Maps key presses to simulation actions.
///
/// Owns its subscription: there is one wiring point ([`attach`](Self::attach))
/// and it registers at most one listener for the dispatcher's lifetime.
/// Dropping the dispatcher unsubscribes.
pub struct InputDispatcher<S, K: KeySource> {
    state: Rc<RefCell<DispatchState<S>>>,
    subscription: Option<K::Subscription>,
}

impl<S, K> InputDispatcher<S, K>
where
    S: Simulation + 'static,
    K: KeySource,
{
    /// Builds a dispatcher over an existing simulation. Nothing is
    /// subscribed until `attach`.
    pub fn new(sim: SimulationHandle<S>, bindings: ActionMap) -> Self {
        Self {
            state: Rc::new(RefCell::new(DispatchState {
                sim,
                bindings,
                input: InputState::default(),
            })),
            subscription: None,
        }
    }

    /// Subscribes to `source`. Repeated calls are no-ops.
    pub fn attach(&mut self, source: &K) -> Result<()> {
        if self.subscription.is_some() {
            log::debug!("input dispatcher already attached; ignoring");
            return Ok(());
        }

        let state = Rc::clone(&self.state);
        let handler: KeyHandler = Box::new(move |ev: &InputEvent| {
            state.borrow_mut().handle(ev);
        });

        let subscription = source
            .subscribe(handler)
            .context("key source rejected the dispatcher")?;
        self.subscription = Some(subscription);

        log::debug!("input dispatcher attached");
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Handles one event directly, bypassing the key source.
    ///
    /// Returns the action that fired, if any.
    pub fn dispatch(&self, ev: &InputEvent) -> Option<Action> {
        self.state.borrow_mut().handle(ev)
    }

    pub fn bindings(&self) -> ActionMap {
        self.state.borrow().bindings.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyEvent, ManualKeys};
    use crate::test_support::{Call, Recorder};

    fn wired() -> (ManualKeys, SimulationHandle<Recorder>, InputDispatcher<Recorder, ManualKeys>) {
        let keys = ManualKeys::default();
        let sim = SimulationHandle::new(Recorder::default());
        let mut dispatcher = InputDispatcher::new(sim.clone(), ActionMap::default());
        dispatcher.attach(&keys).unwrap();
        (keys, sim, dispatcher)
    }

    #[test]
    fn jump_press_fires_once() {
        let (keys, sim, _d) = wired();
        keys.tap(Key::Space);
        assert_eq!(sim.borrow().calls, vec![Call::Jump]);
    }

    #[test]
    fn restart_press_fires_once() {
        let (keys, sim, _d) = wired();
        keys.tap(Key::R);
        keys.tap(Key::R);
        assert_eq!(sim.borrow().calls, vec![Call::Reset, Call::Reset]);
    }

    #[test]
    fn unmapped_key_is_ignored() {
        let (keys, sim, _d) = wired();
        keys.tap(Key::Enter);
        keys.tap(Key::Unknown);
        assert!(sim.borrow().calls.is_empty());
    }

    #[test]
    fn double_attach_registers_once() {
        let (keys, sim, mut dispatcher) = wired();
        dispatcher.attach(&keys).unwrap();
        dispatcher.attach(&keys).unwrap();
        assert_eq!(keys.listener_count(), 1);

        keys.tap(Key::Space);
        assert_eq!(sim.borrow().calls, vec![Call::Jump]);
    }

    #[test]
    fn auto_repeat_does_not_refire() {
        let (keys, sim, _d) = wired();
        keys.emit(KeyEvent::pressed(Key::Space));
        keys.emit(KeyEvent::repeated(Key::Space));
        keys.emit(KeyEvent::repeated(Key::Space));
        keys.emit(KeyEvent::released(Key::Space));
        assert_eq!(sim.borrow().calls, vec![Call::Jump]);
    }

    #[test]
    fn blur_rearms_held_key() {
        let (keys, sim, _d) = wired();
        keys.press(Key::Space);
        keys.blur();
        keys.press(Key::Space);
        assert_eq!(sim.borrow().calls, vec![Call::Jump, Call::Jump]);
    }

    #[test]
    fn drop_unsubscribes() {
        let (keys, sim, dispatcher) = wired();
        drop(dispatcher);
        assert_eq!(keys.listener_count(), 0);
        keys.tap(Key::Space);
        assert!(sim.borrow().calls.is_empty());
    }

    #[test]
    fn dispatch_reports_action() {
        let sim = SimulationHandle::new(Recorder::default());
        let dispatcher: InputDispatcher<_, ManualKeys> =
            InputDispatcher::new(sim.clone(), ActionMap::default());
        assert_eq!(dispatcher.dispatch(&KeyEvent::pressed(Key::R).into()), Some(Action::Restart));
        assert_eq!(dispatcher.dispatch(&KeyEvent::pressed(Key::Q).into()), None);
        assert!(!dispatcher.is_attached());
    }

    #[test]
    fn custom_bindings() {
        let keys = ManualKeys::default();
        let sim = SimulationHandle::new(Recorder::default());
        let mut bindings = ActionMap::empty();
        bindings.bind(Key::ArrowUp, Action::Jump);
        let mut dispatcher = InputDispatcher::new(sim.clone(), bindings);
        dispatcher.attach(&keys).unwrap();

        keys.tap(Key::Space);
        keys.tap(Key::ArrowUp);
        assert_eq!(sim.borrow().calls, vec![Call::Jump]);
    }
}
