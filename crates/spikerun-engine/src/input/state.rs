use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyEvent, KeyState};

/// Held-key tracking.
///
/// Reduces raw host events to fresh presses: a key counts as pressed once
/// until it is released, whatever the host delivers in between (auto-repeat,
/// duplicated events).
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an event and returns the key if it is a fresh press.
    pub fn apply_event(&mut self, ev: &InputEvent) -> Option<Key> {
        match *ev {
            InputEvent::Focused(focused) => {
                if !focused {
                    // Key-up events are lost while unfocused; avoid stuck keys.
                    self.keys_down.clear();
                }
                None
            }

            InputEvent::Key(KeyEvent { key, state, repeat }) => match state {
                KeyState::Pressed => {
                    let inserted = self.keys_down.insert(key);
                    (inserted && !repeat).then_some(key)
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                    None
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}
