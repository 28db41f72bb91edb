// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation.
//!
//! Checks run independently and accumulate, so a user sees every problem in a
//! config file at once rather than fixing them one by one.

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::errors::ValidationError;

/// Validates a loaded configuration.
///
/// # Returns
///
/// * `Ok(())` - Configuration is usable
/// * `Err(Vec<ValidationError>)` - Every problem found
///
/// # Examples
///
/// ```rust
/// use the_switchboard::config::{validate_config, Config};
///
/// let mut config = Config::default();
/// assert!(validate_config(&config).is_ok());
///
/// config.trigger.default_timeout_ms = Some(0);
/// assert_eq!(validate_config(&config).unwrap_err().len(), 1);
/// ```
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.chain.name.trim().is_empty() {
        errors.push(ValidationError::EmptyValue {
            field: "chain.name",
        });
    }

    if config.socket.path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyValue {
            field: "socket.path",
        });
    }

    let timeouts = [
        ("trigger.default_timeout_ms", config.trigger.default_timeout_ms),
        ("socket.connect_timeout_ms", config.socket.connect_timeout_ms),
        ("socket.io_timeout_ms", config.socket.io_timeout_ms),
    ];
    for (field, value) in timeouts {
        if value == Some(0) {
            errors.push(ValidationError::ZeroTimeout { field });
        }
    }

    if let Some(filter) = &config.logging.filter {
        if let Err(e) = EnvFilter::try_new(filter) {
            errors.push(ValidationError::InvalidLogFilter {
                filter: filter.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
