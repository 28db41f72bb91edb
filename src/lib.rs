// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // socket transport + test stubs
pub mod config;     // YAML/TOML config
pub mod engine;     // task chains
pub mod errors;     // error handling
pub mod events;     // event emitter + subscriptions
pub mod observability;
pub mod store;      // heterogeneous typed store
pub mod sync;       // triggers
pub mod tasks;      // task lifecycle + adapters
pub mod traits;     // unified abstractions
