// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and
//! operational logging, plus the one-call subscriber setup used by binaries.
//! Message types follow a struct-based pattern with `Display` so log text is not
//! scattered through the codebase as magic strings.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::chain` - Task chain lifecycle
//! * `messages::config` - Configuration loading
//! * `messages::task` - Individual task execution
//! * `messages::transport` - Local-socket serving and requests
//!
//! Library code only emits events; installing a subscriber is left to the
//! hosting program through [`init_tracing`].

pub mod messages;
mod subscriber;

pub use subscriber::{build_filter, init_tracing};
