// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for human-readable output and
//! [`StructuredLog`] to emit itself with typed `tracing` fields at its own level.
//!
//! # Organization
//!
//! * `chain` - Task chain lifecycle (start, entry hand-off, terminal outcome)
//! * `config` - Configuration loading
//! * `events` - Event emission
//! * `task` - Individual task execution
//! * `transport` - Local-socket serving and requests
//!
//! # Usage Pattern
//!
//! ```rust
//! use the_switchboard::observability::messages::{chain::ChainStarted, StructuredLog};
//!
//! let msg = ChainStarted {
//!     chain: "handshake",
//!     entry_count: 3,
//! };
//!
//! let span = msg.span("chain_execution");
//! let _guard = span.enter();
//! msg.log();
//! ```

use tracing::Span;

pub mod chain;
pub mod config;
pub mod events;
pub mod task;
pub mod transport;

/// A log message that knows its level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// Open a span carrying the message's fields; `name` tags the span.
    fn span(&self, name: &str) -> Span;
}
