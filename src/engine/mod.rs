// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Task chain orchestration.

pub mod builder;
pub mod chain;
pub mod hooks;
#[cfg(all(test, unix))]
mod integration_tests;

pub use builder::ChainBuilder;
pub use chain::{ChainEntry, ChainEvent, StateHandle, TaskChain};
pub use hooks::{ChainHooks, NoHooks};
