//! Input subsystem.
//!
//! Public API is host-agnostic. Platform code translates its native events
//! into `InputEvent`s and delivers them through a `KeySource`; the
//! `InputDispatcher` turns fresh presses into simulation actions.

mod actions;
mod dispatcher;
mod manual;
mod state;
mod types;

pub use actions::{Action, ActionMap};
pub use dispatcher::{InputDispatcher, KeyHandler, KeySource};
pub use manual::{ManualKeys, ManualSubscription};
pub use state::InputState;
pub use types::{InputEvent, Key, KeyEvent, KeyState};
