//! Slot registry: which controller answers for each state machine.

use core::ptr;

use super::slot::{Slot, MAX_SLOTS};

/// Fixed-capacity table from [`Slot`] to a non-owning controller reference.
///
/// At most one controller occupies a slot. Entries are compared by address,
/// never by value, so a controller can only remove itself.
#[derive(Debug)]
pub struct SlotRegistry<'a, C> {
    slots: [Option<&'a C>; MAX_SLOTS],
}

impl<'a, C> Default for SlotRegistry<'a, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C> SlotRegistry<'a, C> {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            slots: [None; MAX_SLOTS],
        }
    }

    /// Register (`activate == true`) or unregister a controller.
    ///
    /// When registering, returns `true` if the slot was empty and `false` if a
    /// previous occupant was evicted. When unregistering, the slot is cleared
    /// only if `controller` is its current occupant; the call returns `true`
    /// either way.
    pub fn register(&mut self, slot: Slot, controller: &'a C, activate: bool) -> bool {
        let entry = &mut self.slots[slot.index()];
        if activate {
            entry.replace(controller).is_none()
        } else {
            if entry.is_some_and(|current| ptr::eq(current, controller)) {
                *entry = None;
            }
            true
        }
    }

    /// Current occupant of `slot`.
    #[inline]
    pub fn lookup(&self, slot: Slot) -> Option<&'a C> {
        self.slots[slot.index()]
    }

    /// Whether `controller` is the current occupant of `slot`.
    pub fn holds(&self, slot: Slot, controller: &C) -> bool {
        self.lookup(slot)
            .is_some_and(|current| ptr::eq(current, controller))
    }

    /// Remove and return the occupant of `slot`, whoever it is.
    pub fn evict(&mut self, slot: Slot) -> Option<&'a C> {
        self.slots[slot.index()].take()
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Check if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterate over occupied slots.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &'a C)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| Some((Slot::from_index(index)?, (*entry)?)))
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        self.slots = [None; MAX_SLOTS];
    }
}
