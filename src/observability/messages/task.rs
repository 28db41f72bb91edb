// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for individual task execution.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Task execution started.
///
/// # Log Level
/// `debug!` - Per-task detail
pub struct TaskStarted<'a> {
    pub task: &'a str,
}

impl Display for TaskStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Task '{}' started", self.task)
    }
}

impl StructuredLog for TaskStarted<'_> {
    fn log(&self) {
        tracing::debug!(task = self.task, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("task", span_name = name, task = self.task)
    }
}

/// Task finished successfully.
///
/// # Log Level
/// `debug!` - Per-task detail
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::task::TaskFinished;
/// use std::time::Duration;
///
/// let msg = TaskFinished {
///     task: "ping",
///     result_entries: 2,
///     duration: Duration::from_millis(3),
/// };
///
/// assert_eq!(msg.to_string(), "Task 'ping' finished: 2 result entries in 3ms");
/// ```
pub struct TaskFinished<'a> {
    pub task: &'a str,
    pub result_entries: usize,
    pub duration: Duration,
}

impl Display for TaskFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Task '{}' finished: {} result entries in {:?}",
            self.task, self.result_entries, self.duration
        )
    }
}

impl StructuredLog for TaskFinished<'_> {
    fn log(&self) {
        tracing::debug!(
            task = self.task,
            result_entries = self.result_entries,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "task_finished",
            span_name = name,
            task = self.task,
            duration = ?self.duration,
        )
    }
}

/// Task failed, by error or panic.
///
/// # Log Level
/// `warn!` - The owning chain decides whether this is fatal
pub struct TaskFailed<'a> {
    pub task: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TaskFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Task '{}' failed: {}", self.task, self.error)
    }
}

impl StructuredLog for TaskFailed<'_> {
    fn log(&self) {
        tracing::warn!(task = self.task, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "task_failed",
            span_name = name,
            task = self.task,
            error = %self.error,
        )
    }
}
