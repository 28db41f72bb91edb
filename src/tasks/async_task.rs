// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

use crate::errors::TaskError;
use crate::store::TypedStore;
use crate::sync::Trigger;
use crate::tasks::{TaskCore, TaskState};
use crate::traits::{AsyncJob, Task};

/// Adapts an [`AsyncJob`] to the blocking [`Task`] interface.
///
/// `execute()` blocks the calling thread on the job's future through the given
/// runtime handle. The handle must belong to a multi-thread runtime, and
/// `execute()` must not be called from one of that runtime's own threads; doing
/// so panics inside tokio, which the task captures as a failure.
pub struct AsyncTask<J> {
    core: TaskCore,
    job: J,
    runtime: Handle,
}

impl<J: AsyncJob> AsyncTask<J> {
    /// Wrap `job`, naming the task after it.
    pub fn new(job: J, runtime: Handle) -> Self {
        Self {
            core: TaskCore::new(job.name()),
            job,
            runtime,
        }
    }

    /// Fire `trigger` once the job finishes.
    pub fn with_completion(mut self, trigger: Arc<Trigger>) -> Self {
        self.core = self.core.with_completion(trigger);
        self
    }

    pub fn job(&self) -> &J {
        &self.job
    }
}

impl<J: AsyncJob> Task for AsyncTask<J> {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn execute(&self) -> Result<(), TaskError> {
        self.core
            .run(|out| self.runtime.block_on(self.job.run(out)))
    }

    fn state(&self) -> TaskState {
        self.core.state()
    }

    fn failure(&self) -> Option<TaskError> {
        self.core.failure()
    }

    fn get(&self, timeout: Duration) -> Option<Arc<TypedStore>> {
        self.core.wait_result(timeout)
    }
}
