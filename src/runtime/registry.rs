//! Arena of registered states with an identity index.

use crate::core::{State, StateId};
use std::collections::HashMap;

pub(crate) struct Entry<O: 'static, K: StateId> {
    pub(crate) id: K,
    pub(crate) state: Box<dyn State<O, K>>,
}

/// Registered states in registration order, indexed by identity.
///
/// Slots are never removed individually; the whole registry is cleared on
/// disposal, so a slot index stays valid for the life of the machine.
pub(crate) struct Registry<O: 'static, K: StateId> {
    entries: Vec<Entry<O, K>>,
    index: HashMap<K, usize>,
}

impl<O: 'static, K: StateId> Registry<O, K> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a state under its own identity.
    ///
    /// Returns the new slot, or `None` if the identity is already taken (the
    /// first registration wins and `state` is dropped).
    pub(crate) fn insert(&mut self, state: Box<dyn State<O, K>>) -> Option<usize> {
        let id = state.id();
        if self.index.contains_key(&id) {
            return None;
        }
        let slot = self.entries.len();
        self.entries.push(Entry { id, state });
        self.index.insert(id, slot);
        Some(slot)
    }

    pub(crate) fn slot_of(&self, id: K) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub(crate) fn get(&self, slot: usize) -> Option<&Entry<O, K>> {
        self.entries.get(slot)
    }

    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut Entry<O, K>> {
        self.entries.get_mut(slot)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entry<O, K>> {
        self.entries.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}
