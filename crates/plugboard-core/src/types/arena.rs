#![expect(clippy::cast_possible_truncation)]

use crate::types::Id;
use std::ops::{Index, IndexMut};

///
/// Arena
///
/// Append-only slab for one entity or connection kind.
///
/// Slots are never freed during an editor session: removing an entity from
/// the graph detaches it from its owning membership list while the slot
/// keeps its data. Change revert re-attaches the same id, which is what
/// makes undo restore identical identities without snapshotting.
///

#[derive(Clone, Debug)]
pub struct Arena<K> {
    slots: Vec<K>,
}

impl<K> Default for Arena<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Arena<K> {
    /// Create an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Allocate a slot and return its typed id.
    pub fn alloc(&mut self, value: K) -> Id<K> {
        let index = self.slots.len() as u32;
        self.slots.push(value);

        Id::new(index)
    }

    /// Return the number of allocated slots (attached or not).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot has ever been allocated.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Return the slot for `id`, if it was allocated by this arena.
    #[must_use]
    pub fn get(&self, id: Id<K>) -> Option<&K> {
        self.slots.get(id.index())
    }

    /// Return the mutable slot for `id`, if it was allocated by this arena.
    #[must_use]
    pub fn get_mut(&mut self, id: Id<K>) -> Option<&mut K> {
        self.slots.get_mut(id.index())
    }

    /// Iterate all allocated slots with their ids, in allocation order.
    pub fn entries(&self) -> impl Iterator<Item = (Id<K>, &K)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, value)| (Id::new(index as u32), value))
    }
}

impl<K> Index<Id<K>> for Arena<K> {
    type Output = K;

    fn index(&self, id: Id<K>) -> &K {
        &self.slots[id.index()]
    }
}

impl<K> IndexMut<Id<K>> for Arena<K> {
    fn index_mut(&mut self, id: Id<K>) -> &mut K {
        &mut self.slots[id.index()]
    }
}

///
/// TESTS
///
