use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use spikerun_engine::input::{InputEvent, Key, KeyEvent, KeyHandler, KeySource, KeyState};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, KeyboardEvent, Window};

use super::describe;

type Listener = Closure<dyn FnMut(Event)>;
type SharedHandler = Rc<RefCell<KeyHandler>>;

/// Keyboard events from the document, focus loss from the window.
pub struct DocumentKeys {
    window: Window,
    document: Document,
}

impl DocumentKeys {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

/// Registered DOM listeners. Dropping it removes them.
pub struct DomSubscription {
    listeners: Vec<(EventTarget, &'static str, Listener)>,
}

impl DomSubscription {
    fn listen(&mut self, target: &EventTarget, kind: &'static str, listener: Listener) -> Result<()> {
        target
            .add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("addEventListener(\"{kind}\") failed: {}", describe(&e)))?;
        self.listeners.push((target.clone(), kind, listener));
        Ok(())
    }
}

impl Drop for DomSubscription {
    fn drop(&mut self) {
        for (target, kind, listener) in self.listeners.drain(..) {
            if let Err(e) =
                target.remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
            {
                log::warn!("removeEventListener(\"{kind}\") failed: {}", describe(&e));
            }
        }
    }
}

impl KeySource for DocumentKeys {
    type Subscription = DomSubscription;

    fn subscribe(&self, handler: KeyHandler) -> Result<DomSubscription> {
        let handler: SharedHandler = Rc::new(RefCell::new(handler));
        let mut subscription = DomSubscription { listeners: Vec::new() };

        subscription.listen(
            self.document.as_ref(),
            "keydown",
            key_listener(Rc::clone(&handler), KeyState::Pressed),
        )?;
        subscription.listen(
            self.document.as_ref(),
            "keyup",
            key_listener(Rc::clone(&handler), KeyState::Released),
        )?;
        subscription.listen(self.window.as_ref(), "blur", blur_listener(handler))?;

        Ok(subscription)
    }
}

fn deliver(handler: &SharedHandler, ev: InputEvent) {
    let mut handler = handler.borrow_mut();
    (*handler)(&ev);
}

fn key_listener(handler: SharedHandler, state: KeyState) -> Listener {
    Closure::new(move |event: Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let ev = KeyEvent {
            key: Key::from_code(&event.code()),
            state,
            repeat: event.repeat(),
        };
        deliver(&handler, ev.into());
    })
}

fn blur_listener(handler: SharedHandler) -> Listener {
    Closure::new(move |_: Event| deliver(&handler, InputEvent::Focused(false)))
}
