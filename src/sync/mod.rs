// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Blocking hand-off primitives shared between tasks and threads.

mod trigger;

pub use trigger::Trigger;
