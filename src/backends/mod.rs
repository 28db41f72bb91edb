// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concrete task backends.
//!
//! # Available Backends
//!
//! ## Socket Backend (Unix only)
//! Request/reply exchanges over a Unix domain socket:
//! - **LocalSocketServer**: Serves requests with a synchronous handler on a tokio runtime
//! - **SocketRequest**: `AsyncJob` performing one exchange, run as a chain entry via `AsyncTask`
//!
//! ## Stub Backend (Test-Only)
//! Testing utilities for chain development (only available in test builds):
//! - **CountingTask**: Records how often it ran and publishes the run number
//! - **FailingTask**: Simulates a task body returning an error
//! - **PanickingTask**: Panics straight out of `execute()`
//! - **Note**: NOT available in production builds

#[cfg(unix)]
pub mod socket;
#[cfg(test)]
pub mod stub;
