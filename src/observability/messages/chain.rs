// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for task chain lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Chain start
//! * Entry hand-off (task executed, trigger satisfied)
//! * Terminal outcome (finished, failed, timed out)

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Chain execution started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::chain::ChainStarted;
///
/// let msg = ChainStarted {
///     chain: "handshake",
///     entry_count: 3,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ChainStarted<'a> {
    pub chain: &'a str,
    pub entry_count: usize,
}

impl Display for ChainStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting chain '{}' with {} entries",
            self.chain, self.entry_count
        )
    }
}

impl StructuredLog for ChainStarted<'_> {
    fn log(&self) {
        tracing::info!(
            chain = self.chain,
            entry_count = self.entry_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "chain",
            span_name = name,
            chain = self.chain,
            entry_count = self.entry_count,
        )
    }
}

/// One entry's task ran and its trigger (if any) fired.
///
/// # Log Level
/// `debug!` - Per-entry detail
pub struct ChainEntryCompleted<'a> {
    pub chain: &'a str,
    pub entry: usize,
    pub task: &'a str,
    pub waited_on_trigger: bool,
}

impl Display for ChainEntryCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let via = if self.waited_on_trigger {
            "trigger fired"
        } else {
            "no trigger"
        };
        write!(
            f,
            "Chain '{}' entry {} ('{}') completed ({})",
            self.chain, self.entry, self.task, via
        )
    }
}

impl StructuredLog for ChainEntryCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            chain = self.chain,
            entry = self.entry,
            task = self.task,
            waited_on_trigger = self.waited_on_trigger,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "chain_entry",
            span_name = name,
            chain = self.chain,
            entry = self.entry,
            task = self.task,
        )
    }
}

/// Chain drained every entry.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::chain::ChainFinished;
/// use std::time::Duration;
///
/// let msg = ChainFinished {
///     chain: "handshake",
///     executed: 3,
///     duration: Duration::from_millis(250),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ChainFinished<'a> {
    pub chain: &'a str,
    pub executed: usize,
    pub duration: Duration,
}

impl Display for ChainFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Chain '{}' finished: {} entries in {:?}",
            self.chain, self.executed, self.duration
        )
    }
}

impl StructuredLog for ChainFinished<'_> {
    fn log(&self) {
        tracing::info!(
            chain = self.chain,
            executed = self.executed,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "chain_finished",
            span_name = name,
            chain = self.chain,
            executed = self.executed,
            duration = ?self.duration,
        )
    }
}

/// Chain aborted because an entry's task failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ChainFailed<'a> {
    pub chain: &'a str,
    pub entry: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for ChainFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Chain '{}' failed at entry {}: {}",
            self.chain, self.entry, self.error
        )
    }
}

impl StructuredLog for ChainFailed<'_> {
    fn log(&self) {
        tracing::error!(
            chain = self.chain,
            entry = self.entry,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "chain_failed",
            span_name = name,
            chain = self.chain,
            entry = self.entry,
            error = %self.error,
        )
    }
}

/// Chain stopped because an entry's trigger was never signaled.
///
/// # Log Level
/// `warn!` - Timeout is an outcome, not an error
pub struct ChainTimedOut<'a> {
    pub chain: &'a str,
    pub entry: usize,
    pub timeout: Option<Duration>,
}

impl Display for ChainTimedOut<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.timeout {
            Some(timeout) => write!(
                f,
                "Chain '{}' timed out after {:?} waiting on entry {}",
                self.chain, timeout, self.entry
            ),
            None => write!(
                f,
                "Chain '{}' gave up waiting on entry {}",
                self.chain, self.entry
            ),
        }
    }
}

impl StructuredLog for ChainTimedOut<'_> {
    fn log(&self) {
        tracing::warn!(
            chain = self.chain,
            entry = self.entry,
            timeout = ?self.timeout,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "chain_timed_out",
            span_name = name,
            chain = self.chain,
            entry = self.entry,
        )
    }
}

/// A chain observer (state handle or lifecycle hook) panicked; the run carried on.
///
/// # Log Level
/// `warn!` - Recoverable problem in caller-supplied code
pub struct ObserverPanicked<'a> {
    pub chain: &'a str,
    pub observer: &'a str,
    pub message: &'a str,
}

impl Display for ObserverPanicked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Observer '{}' of chain '{}' panicked: {}",
            self.observer, self.chain, self.message
        )
    }
}

impl StructuredLog for ObserverPanicked<'_> {
    fn log(&self) {
        tracing::warn!(
            chain = self.chain,
            observer = self.observer,
            panic = self.message,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "chain",
            span_name = name,
            chain = self.chain,
            observer = self.observer,
        )
    }
}
