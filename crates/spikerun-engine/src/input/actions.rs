use std::collections::HashMap;

use crate::core::Simulation;

use super::types::Key;

/// Discrete game actions reachable from the keyboard.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Action {
    Jump,
    Restart,
}

impl Action {
    /// Invokes the matching capability on the simulation.
    pub fn apply<S: Simulation + ?Sized>(self, sim: &mut S) {
        match self {
            Action::Jump => sim.trigger_jump(),
            Action::Restart => sim.reset(),
        }
    }
}

/// Key → action bindings.
///
/// A key maps to at most one action, so binding the same pair twice leaves
/// the map unchanged. Several keys may share an action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionMap {
    bindings: HashMap<Key, Action>,
}

impl ActionMap {
    pub fn empty() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// Binds `key` to `action`, returning the action it replaced.
    pub fn bind(&mut self, key: Key, action: Action) -> Option<Action> {
        self.bindings.insert(key, action)
    }

    pub fn unbind(&mut self, key: Key) -> Option<Action> {
        self.bindings.remove(&key)
    }

    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    pub fn keys_for(&self, action: Action) -> impl Iterator<Item = Key> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, a)| **a == action)
            .map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for ActionMap {
    /// Space jumps, R restarts.
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(Key::Space, Action::Jump);
        map.bind(Key::R, Action::Restart);
        map
    }
}
