// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Multi-subscriber event emission with lifetime-tracked subscriptions.

mod emitter;
mod subscription;

pub use emitter::EventEmitter;
pub use subscription::Subscription;
