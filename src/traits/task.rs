// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;

use crate::errors::TaskError;
use crate::store::TypedStore;
use crate::tasks::TaskState;

/// A unit of work with an explicit lifecycle.
///
/// Tasks move `Created → Executing → {Finished | Failed | Timeout}` and never
/// leave a terminal state. They are shared (`Arc<dyn Task>`) between whoever
/// built them and the chains that run them, so every method takes `&self`.
///
/// Most implementations embed a [`TaskCore`](crate::tasks::TaskCore) and
/// delegate the introspection methods to it.
pub trait Task: Send + Sync {
    fn name(&self) -> &str;

    /// Run the task to a terminal state.
    ///
    /// Returns `Err` when the run did not finish; the same failure is then
    /// available from [`Task::failure`]. Calling this on a task that already
    /// left `Created` returns [`TaskError::AlreadyExecuted`] and changes nothing.
    fn execute(&self) -> Result<(), TaskError>;

    fn state(&self) -> TaskState;

    fn finished(&self) -> bool {
        self.state() == TaskState::Finished
    }

    fn error(&self) -> bool {
        self.state() == TaskState::Failed
    }

    fn timed_out(&self) -> bool {
        self.state() == TaskState::Timeout
    }

    /// The captured failure, if the task failed.
    fn failure(&self) -> Option<TaskError>;

    /// Block until the task reaches a terminal state or `timeout` elapses.
    ///
    /// Yields the result store only for a `Finished` task; `Failed`, `Timeout`
    /// and an elapsed wait all yield `None`.
    fn get(&self, timeout: Duration) -> Option<Arc<TypedStore>>;
}
