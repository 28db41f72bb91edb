// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod job;
pub mod task;

pub use job::AsyncJob;
pub use task::Task;
