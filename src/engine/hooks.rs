// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::TaskError;

/// Terminal-outcome extension points for a [`TaskChain`](crate::engine::TaskChain).
///
/// Every method defaults to a no-op. Domain-specific orchestrators implement the
/// ones they care about and build their chain with
/// [`TaskChain::with_hooks`](crate::engine::TaskChain::with_hooks). Exactly one
/// hook fires per run, after the chain has reached its terminal state.
pub trait ChainHooks: Send + Sync {
    /// Every entry ran and every trigger fired.
    fn on_task_completed(&self) {}

    /// The task of entry `entry` failed; the chain stopped there.
    fn on_task_failed(&self, _entry: usize, _failure: &TaskError) {}

    /// The trigger of entry `entry` was never signaled; the chain stopped there.
    fn on_task_timeout(&self, _entry: usize) {}
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl ChainHooks for NoHooks {}
