// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Build the event filter: `RUST_LOG` when set and valid, else the configured directive.
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.filter()))
}

/// Install a global `fmt` subscriber.
///
/// Returns `false` if a global subscriber was already installed (for example by
/// a test harness); the existing one is left in place.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    fmt()
        .with_env_filter(build_filter(config))
        .with_target(true)
        .try_init()
        .is_ok()
}
