// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Shared lifecycle cell for task implementations.
//!
//! [`TaskCore`] owns the state machine, the failure slot and the result of one
//! task behind a single mutex, with a condition variable so [`TaskCore::wait_result`]
//! can block until the task settles. Concrete tasks embed one and forward the
//! [`Task`](crate::traits::Task) introspection methods to it.

use parking_lot::{Condvar, Mutex};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::errors::TaskError;
use crate::observability::messages::{task::*, StructuredLog};
use crate::store::TypedStore;
use crate::sync::Trigger;
use crate::tasks::TaskState;

struct Lifecycle {
    state: TaskState,
    failure: Option<TaskError>,
    result: Option<Arc<TypedStore>>,
}

pub struct TaskCore {
    name: String,
    lifecycle: Mutex<Lifecycle>,
    settled: Condvar,
    completion: Option<Arc<Trigger>>,
}

impl TaskCore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lifecycle: Mutex::new(Lifecycle {
                state: TaskState::Created,
                failure: None,
                result: None,
            }),
            settled: Condvar::new(),
            completion: None,
        }
    }

    /// Fire `trigger` when the task finishes successfully.
    ///
    /// This is how a task signals the trigger its own chain entry waits on.
    pub fn with_completion(mut self, trigger: Arc<Trigger>) -> Self {
        self.completion = Some(trigger);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> TaskState {
        self.lifecycle.lock().state
    }

    pub fn failure(&self) -> Option<TaskError> {
        self.lifecycle.lock().failure.clone()
    }

    /// `Created → Executing`. Any other starting state is rejected untouched.
    pub fn begin(&self) -> Result<(), TaskError> {
        let mut lifecycle = self.lifecycle.lock();
        if lifecycle.state != TaskState::Created {
            return Err(TaskError::AlreadyExecuted {
                task: self.name.clone(),
                state: lifecycle.state,
            });
        }
        lifecycle.state = TaskState::Executing;
        Ok(())
    }

    /// `Executing → Finished`, publishing `result`.
    pub fn finish(&self, result: TypedStore) {
        let settled = self.settle(TaskState::Finished, |lifecycle| {
            lifecycle.result = Some(Arc::new(result));
        });
        if settled {
            if let Some(trigger) = &self.completion {
                trigger.trigger();
            }
        }
    }

    /// `Executing → Failed`, capturing `error`.
    pub fn fail(&self, error: TaskError) {
        self.settle(TaskState::Failed, |lifecycle| {
            lifecycle.failure = Some(error);
        });
    }

    /// `Executing → Timeout`. Timeout is an outcome, so the failure slot stays empty.
    pub fn time_out(&self) {
        self.settle(TaskState::Timeout, |_| {});
    }

    fn settle(&self, terminal: TaskState, apply: impl FnOnce(&mut Lifecycle)) -> bool {
        let mut lifecycle = self.lifecycle.lock();
        if lifecycle.state != TaskState::Executing {
            return false;
        }
        apply(&mut lifecycle);
        lifecycle.state = terminal;
        self.settled.notify_all();
        true
    }

    /// Block until the task is terminal or `timeout` elapses; the result only if `Finished`.
    pub fn wait_result(&self, timeout: Duration) -> Option<Arc<TypedStore>> {
        let mut lifecycle = self.lifecycle.lock();
        self.settled
            .wait_while_for(&mut lifecycle, |l| !l.state.is_terminal(), timeout);
        match lifecycle.state {
            TaskState::Finished => lifecycle.result.clone(),
            _ => None,
        }
    }

    /// Drive a whole run: begin, call `body` with a fresh result store, settle.
    ///
    /// An error or a panic from `body` moves the task to `Failed`; the failure is
    /// both captured and returned.
    pub fn run<F>(&self, body: F) -> Result<(), TaskError>
    where
        F: FnOnce(&mut TypedStore) -> anyhow::Result<()>,
    {
        self.begin()?;

        let start_msg = TaskStarted { task: &self.name };
        let span = start_msg.span("task_execution");
        let _guard = span.enter();
        start_msg.log();

        let start_time = Instant::now();
        let mut output = TypedStore::new();

        let outcome = match catch_unwind(AssertUnwindSafe(|| body(&mut output))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(TaskError::failed(self.name.clone(), e)),
            Err(payload) => Err(TaskError::from_panic(self.name.clone(), payload)),
        };

        match outcome {
            Ok(()) => {
                TaskFinished {
                    task: &self.name,
                    result_entries: output.size(),
                    duration: start_time.elapsed(),
                }
                .log();
                self.finish(output);
                Ok(())
            }
            Err(error) => {
                TaskFailed {
                    task: &self.name,
                    error: &error,
                }
                .log();
                self.fail(error.clone());
                Err(error)
            }
        }
    }
}

impl std::fmt::Debug for TaskCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskCore")
            .field("name", &self.name)
            .field("state", &self.state())
            .finish()
    }
}
