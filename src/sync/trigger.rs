// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Resettable, timeout-bounded wait/signal primitive.
//!
//! A [`Trigger`] starts armed. [`Trigger::trigger`] latches it and wakes every
//! waiter; it stays triggered, so later waiters return at once, until
//! [`Trigger::reset`] re-arms it. Waits check the flag under the same lock the
//! condition variable sleeps on, so a `trigger()` racing a `wait()` is never lost.
//!
//! # Example
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use std::time::Duration;
//! use the_switchboard::sync::Trigger;
//!
//! let trigger = Arc::new(Trigger::with_timeout(Duration::from_secs(5)));
//! let signaler = Arc::clone(&trigger);
//!
//! let handle = thread::spawn(move || signaler.trigger());
//!
//! assert!(trigger.wait());
//! handle.join().unwrap();
//! ```

use parking_lot::{Condvar, Mutex};
use std::time::Duration;

use crate::config::TriggerConfig;

pub struct Trigger {
    triggered: Mutex<bool>,
    monitor: Condvar,
    /// `None` waits without limit
    timeout: Option<Duration>,
}

impl Trigger {
    /// An armed trigger whose `wait()` has no practical limit.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// An armed trigger whose `wait()` gives up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    /// An armed trigger using the configured default timeout.
    pub fn from_config(config: &TriggerConfig) -> Self {
        Self::build(config.default_timeout())
    }

    fn build(timeout: Option<Duration>) -> Self {
        Self {
            triggered: Mutex::new(false),
            monitor: Condvar::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Block until triggered or the configured timeout elapses.
    ///
    /// Returns the flag as observed after the wait.
    pub fn wait(&self) -> bool {
        match self.timeout {
            Some(timeout) => self.wait_for(timeout),
            None => {
                let mut triggered = self.triggered.lock();
                self.monitor.wait_while(&mut triggered, |triggered| !*triggered);
                *triggered
            }
        }
    }

    /// Block until triggered or `timeout` elapses, ignoring the configured default.
    pub fn wait_for(&self, timeout: Duration) -> bool {
        let mut triggered = self.triggered.lock();
        self.monitor
            .wait_while_for(&mut triggered, |triggered| !*triggered, timeout);
        *triggered
    }

    /// Latch the trigger and wake every waiter. Idempotent.
    pub fn trigger(&self) {
        let mut triggered = self.triggered.lock();
        *triggered = true;
        self.monitor.notify_all();
    }

    /// Return to armed. No-op when not triggered.
    pub fn reset(&self) {
        let mut triggered = self.triggered.lock();
        if *triggered {
            *triggered = false;
        }
    }

    pub fn triggered(&self) -> bool {
        *self.triggered.lock()
    }
}

impl Default for Trigger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trigger")
            .field("triggered", &self.triggered())
            .field("timeout", &self.timeout)
            .finish()
    }
}
