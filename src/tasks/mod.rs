// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Task state machine and the built-in task adapters.
//!
//! * [`TaskState`] - lifecycle states and their numeric codes
//! * [`TaskCore`] - reusable state/failure/result cell embedded by tasks
//! * [`FnTask`] - a task from a closure
//! * [`AsyncTask`] - an [`AsyncJob`](crate::traits::AsyncJob) driven on a tokio runtime

mod async_task;
mod fn_task;
mod lifecycle;
mod state;

pub use async_task::AsyncTask;
pub use fn_task::FnTask;
pub use lifecycle::TaskCore;
pub use state::TaskState;
