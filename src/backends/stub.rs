// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::TaskError;
use crate::store::TypedStore;
use crate::tasks::{TaskCore, TaskState};
use crate::traits::Task;

/// A task that records how many times its body ran
pub struct CountingTask {
    core: TaskCore,
    runs: AtomicUsize,
}

impl CountingTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: TaskCore::new(name),
            runs: AtomicUsize::new(0),
        }
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

impl Task for CountingTask {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn execute(&self) -> Result<(), TaskError> {
        self.core.run(|out| {
            let run = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
            out.set("run".to_string(), run)?;
            Ok(())
        })
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

/// A task whose body always returns an error
pub struct FailingTask {
    core: TaskCore,
}

impl FailingTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: TaskCore::new(name),
        }
    }
}

impl Task for FailingTask {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn execute(&self) -> Result<(), TaskError> {
        self.core.run(|_| anyhow::bail!("Simulated task failure"))
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

/// A task that panics without going through `TaskCore::run`, so the
/// panic reaches whoever calls `execute()`
pub struct PanickingTask {
    name: String,
}

impl PanickingTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Task for PanickingTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self) -> Result<(), TaskError> {
        panic!("Simulated task panic in '{}'", self.name)
    }

    fn state(&self) -> TaskState {
        TaskState::Created
    }

    fn failure(&self) -> Option<TaskError> {
        None
    }

    fn get(&self, _timeout: Duration) -> Option<Arc<TypedStore>> {
        None
    }
}
