// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;

use crate::errors::TaskError;
use crate::store::TypedStore;
use crate::sync::Trigger;
use crate::tasks::{TaskCore, TaskState};
use crate::traits::Task;

/// A task whose work is a closure writing into the result store.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use the_switchboard::tasks::FnTask;
/// use the_switchboard::traits::Task;
///
/// let task = FnTask::new("greet", |out| {
///     out.set("greeting".to_string(), "hello".to_string())?;
///     Ok(())
/// });
///
/// task.execute().unwrap();
/// let result = task.get(Duration::ZERO).unwrap();
/// assert_eq!(result.get::<String, _>("greeting").unwrap(), "hello");
/// ```
pub struct FnTask<F> {
    core: TaskCore,
    body: F,
}

impl<F> FnTask<F>
where
    F: Fn(&mut TypedStore) -> anyhow::Result<()> + Send + Sync,
{
    pub fn new(name: impl Into<String>, body: F) -> Self {
        Self {
            core: TaskCore::new(name),
            body,
        }
    }

    /// Fire `trigger` once this task finishes.
    pub fn with_completion(mut self, trigger: Arc<Trigger>) -> Self {
        self.core = self.core.with_completion(trigger);
        self
    }
}

impl<F> Task for FnTask<F>
where
    F: Fn(&mut TypedStore) -> anyhow::Result<()> + Send + Sync,
{
    fn name(&self) -> &str {
        self.core.name()
    }

    fn execute(&self) -> Result<(), TaskError> {
        self.core.run(|out| (self.body)(out))
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
