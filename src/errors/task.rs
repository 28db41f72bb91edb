// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Failures captured from task execution.

use std::any::Any;
use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

use crate::tasks::TaskState;

/// A failure that escaped a task's `execute()`.
///
/// The value is captured once into the task's failure slot and handed out by
/// clone on every `failure()` call, so sources are kept behind an `Arc`.
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    /// The task's work returned an error
    #[error("Task '{task}' failed: {source}")]
    Failed {
        task: String,
        #[source]
        source: Arc<dyn Error + Send + Sync>,
    },

    /// The task's work panicked; the panic was caught by the chain
    #[error("Task '{task}' panicked: {message}")]
    Panicked { task: String, message: String },

    /// A chain stopped because the trigger of entry `entry` was never signaled.
    /// Only surfaces when a chain runs as an entry of another chain.
    #[error("Chain '{task}' timed out waiting on the trigger of entry {entry}")]
    TimedOut { task: String, entry: usize },

    /// `execute()` was called on a task that already left `Created`
    #[error("Task '{task}' cannot be executed again (state: {state})")]
    AlreadyExecuted { task: String, state: TaskState },
}

impl TaskError {
    /// Wrap an error returned by a task body.
    pub fn failed(task: impl Into<String>, error: anyhow::Error) -> Self {
        let boxed: Box<dyn Error + Send + Sync> = error.into();
        TaskError::Failed {
            task: task.into(),
            source: Arc::from(boxed),
        }
    }

    /// Convert a caught panic payload into a failure.
    pub fn from_panic(task: impl Into<String>, payload: Box<dyn Any + Send>) -> Self {
        TaskError::Panicked {
            task: task.into(),
            message: panic_message(payload.as_ref()),
        }
    }

    /// Name of the task the failure belongs to.
    pub fn task(&self) -> &str {
        match self {
            TaskError::Failed { task, .. }
            | TaskError::Panicked { task, .. }
            | TaskError::TimedOut { task, .. }
            | TaskError::AlreadyExecuted { task, .. } => task,
        }
    }
}

/// Text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
