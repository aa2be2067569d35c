use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use anyhow::Result;

use super::dispatcher::{KeyHandler, KeySource};
use super::types::{InputEvent, Key, KeyEvent};

type Listeners = RefCell<Vec<(u64, KeyHandler)>>;

/// Deterministic key source for headless runs and tests.
///
/// Events are delivered synchronously, to every listener, when the caller
/// emits them.
#[derive(Default)]
pub struct ManualKeys {
    listeners: Rc<Listeners>,
    next_id: Cell<u64>,
}

/// Removes its listener from the `ManualKeys` it came from on drop.
pub struct ManualSubscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl KeySource for ManualKeys {
    type Subscription = ManualSubscription;

    fn subscribe(&self, handler: KeyHandler) -> Result<ManualSubscription> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, handler));

        Ok(ManualSubscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        })
    }
}

impl Drop for ManualSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl ManualKeys {
    pub fn emit(&self, ev: impl Into<InputEvent>) {
        let ev = ev.into();
        for (_, handler) in self.listeners.borrow_mut().iter_mut() {
            handler(&ev);
        }
    }

    pub fn press(&self, key: Key) {
        self.emit(KeyEvent::pressed(key));
    }

    pub fn release(&self, key: Key) {
        self.emit(KeyEvent::released(key));
    }

    /// One physical key-press: press then release.
    pub fn tap(&self, key: Key) {
        self.press(key);
        self.release(key);
    }

    pub fn blur(&self) {
        self.emit(InputEvent::Focused(false));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}
