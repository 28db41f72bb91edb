// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::errors::panic_message;
use crate::events::subscription::{SharedSlots, SlotKey, SlotTable, Subscription};
use crate::observability::messages::{events::SubscriberPanicked, StructuredLog};

struct Subscriber<A> {
    key: SlotKey,
    callback: Box<dyn FnMut(&A) + Send>,
}

/// Multi-subscriber notifier with lazy pruning of revoked subscribers.
///
/// Subscribers run synchronously inside [`EventEmitter::emit`], in registration
/// order. The emitter itself is not synchronized; wrap it in a lock to share it.
/// Subscription handles may be dropped from any thread.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use the_switchboard::events::EventEmitter;
///
/// let mut emitter = EventEmitter::<u32>::new();
/// let total = Arc::new(AtomicUsize::new(0));
///
/// let sink = Arc::clone(&total);
/// let subscription = emitter.register(move |n| {
///     sink.fetch_add(*n as usize, Ordering::SeqCst);
/// });
///
/// emitter.emit(&5);
/// drop(subscription);
/// emitter.emit(&5);
///
/// assert_eq!(total.load(Ordering::SeqCst), 5);
/// assert_eq!(emitter.count(), 0);
/// ```
pub struct EventEmitter<A> {
    slots: SharedSlots,
    subscribers: Vec<Subscriber<A>>,
}

impl<A> EventEmitter<A> {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(SlotTable::default())),
            subscribers: Vec::new(),
        }
    }

    /// Add `callback`; it runs on every `emit` while the returned handle is held.
    pub fn register<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&A) + Send + 'static,
    {
        let key = self.slots.lock().allocate();
        self.subscribers.push(Subscriber {
            key,
            callback: Box::new(callback),
        });
        Subscription::new(Arc::clone(&self.slots), key)
    }

    /// Invoke every live subscriber with `args`, pruning revoked ones.
    ///
    /// A subscriber that panics is revoked: the panic is logged, its handle
    /// turns invalid, it is never called again and the pass carries on.
    ///
    /// Returns how many subscribers were invoked.
    pub fn emit(&mut self, args: &A) -> usize {
        let mut invoked = 0;
        let slots = Arc::clone(&self.slots);
        self.subscribers.retain_mut(|subscriber| {
            // released while this pass runs, so check under the lock each time
            if !slots.lock().is_live(subscriber.key) {
                slots.lock().free(subscriber.key);
                return false;
            }

            invoked += 1;
            match catch_unwind(AssertUnwindSafe(|| (subscriber.callback)(args))) {
                Ok(()) => true,
                Err(payload) => {
                    SubscriberPanicked {
                        message: &panic_message(payload.as_ref()),
                    }
                    .log();
                    let mut table = slots.lock();
                    table.release(subscriber.key);
                    table.free(subscriber.key);
                    false
                }
            }
        });
        invoked
    }

    /// Tracked subscribers, including revoked ones not yet pruned.
    pub fn count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<A> Default for EventEmitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for EventEmitter<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("subscriber_count", &self.subscribers.len())
            .finish()
    }
}
