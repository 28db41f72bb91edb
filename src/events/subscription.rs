// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Liveness tokens for emitter subscriptions.
//!
//! Liveness lives in a [`SlotTable`]: one slot per subscription, addressed by an
//! index plus a generation. A [`Subscription`] handle releases its slot when it
//! is reset or dropped; the emitter checks the slot on each `emit` and prunes
//! released subscribers. Slot indices are recycled with a bumped generation, so
//! a stale key can never observe a newer subscription as its own.

use parking_lot::Mutex;
use std::sync::Arc;

/// Index plus generation addressing one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotKey {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct Slot {
    generation: u64,
    live: bool,
}

#[derive(Debug, Default)]
pub(crate) struct SlotTable {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl SlotTable {
    pub(crate) fn allocate(&mut self) -> SlotKey {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.generation += 1;
                slot.live = true;
                SlotKey {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    live: true,
                });
                SlotKey {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    pub(crate) fn is_live(&self, key: SlotKey) -> bool {
        self.slots
            .get(key.index)
            .is_some_and(|slot| slot.generation == key.generation && slot.live)
    }

    /// Mark the slot released; the emitter frees it on its next pass.
    pub(crate) fn release(&mut self, key: SlotKey) {
        if let Some(slot) = self.slots.get_mut(key.index) {
            if slot.generation == key.generation {
                slot.live = false;
            }
        }
    }

    /// Return a released slot's index for reuse.
    pub(crate) fn free(&mut self, key: SlotKey) {
        if let Some(slot) = self.slots.get(key.index) {
            if slot.generation == key.generation && !slot.live {
                self.free.push(key.index);
            }
        }
    }
}

pub(crate) type SharedSlots = Arc<Mutex<SlotTable>>;

/// Handle proving a subscription is still wanted.
///
/// Keep it alive for as long as the callback should run. Dropping it, or calling
/// [`Subscription::reset`], revokes the subscription; the emitter prunes it on
/// its next `emit`.
#[must_use = "dropping a Subscription immediately revokes it"]
pub struct Subscription {
    slots: SharedSlots,
    key: Option<SlotKey>,
}

impl Subscription {
    pub(crate) fn new(slots: SharedSlots, key: SlotKey) -> Self {
        Self {
            slots,
            key: Some(key),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self.key {
            Some(key) => self.slots.lock().is_live(key),
            None => false,
        }
    }

    /// Revoke the subscription now. Idempotent.
    pub fn reset(&mut self) {
        if let Some(key) = self.key.take() {
            self.slots.lock().release(key);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.reset();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("key", &self.key)
            .field("valid", &self.is_valid())
            .finish()
    }
}
