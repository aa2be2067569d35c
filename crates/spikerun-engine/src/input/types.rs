use std::fmt;

/// Keyboard key identifier.
///
/// Hosts map their physical key codes into these variants. Browser hosts use
/// [`Key::from_code`] with `KeyboardEvent.code`, which names the physical key
/// regardless of layout, so `KeyR` is the same key on QWERTY and AZERTY.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Any key not represented here.
    Unknown,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.code` value.
    pub fn from_code(code: &str) -> Key {
        match code {
            "Escape" => Key::Escape,
            "Enter" | "NumpadEnter" => Key::Enter,
            "Tab" => Key::Tab,
            "Backspace" => Key::Backspace,
            "Space" => Key::Space,

            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,

            "ShiftLeft" | "ShiftRight" => Key::Shift,
            "ControlLeft" | "ControlRight" => Key::Control,
            "AltLeft" | "AltRight" => Key::Alt,
            "MetaLeft" | "MetaRight" | "OSLeft" | "OSRight" => Key::Meta,

            "KeyA" => Key::A,
            "KeyB" => Key::B,
            "KeyC" => Key::C,
            "KeyD" => Key::D,
            "KeyE" => Key::E,
            "KeyF" => Key::F,
            "KeyG" => Key::G,
            "KeyH" => Key::H,
            "KeyI" => Key::I,
            "KeyJ" => Key::J,
            "KeyK" => Key::K,
            "KeyL" => Key::L,
            "KeyM" => Key::M,
            "KeyN" => Key::N,
            "KeyO" => Key::O,
            "KeyP" => Key::P,
            "KeyQ" => Key::Q,
            "KeyR" => Key::R,
            "KeyS" => Key::S,
            "KeyT" => Key::T,
            "KeyU" => Key::U,
            "KeyV" => Key::V,
            "KeyW" => Key::W,
            "KeyX" => Key::X,
            "KeyY" => Key::Y,
            "KeyZ" => Key::Z,

            "Digit0" => Key::Digit0,
            "Digit1" => Key::Digit1,
            "Digit2" => Key::Digit2,
            "Digit3" => Key::Digit3,
            "Digit4" => Key::Digit4,
            "Digit5" => Key::Digit5,
            "Digit6" => Key::Digit6,
            "Digit7" => Key::Digit7,
            "Digit8" => Key::Digit8,
            "Digit9" => Key::Digit9,

            _ => Key::Unknown,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// One key transition reported by the host.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
    /// True when the host generated the event by auto-repeat.
    pub repeat: bool,
}

impl KeyEvent {
    pub fn pressed(key: Key) -> Self {
        Self { key, state: KeyState::Pressed, repeat: false }
    }

    pub fn released(key: Key) -> Self {
        Self { key, state: KeyState::Released, repeat: false }
    }

    pub fn repeated(key: Key) -> Self {
        Self { key, state: KeyState::Pressed, repeat: true }
    }
}

/// Platform-agnostic input events delivered by a `KeySource`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),

    /// Page/window focus change.
    Focused(bool),
}

impl From<KeyEvent> for InputEvent {
    fn from(ev: KeyEvent) -> Self {
        InputEvent::Key(ev)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
