// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A timeout was configured as zero, which would make every wait fail at once
    ZeroTimeout {
        /// Dotted path of the offending field
        field: &'static str,
    },
    /// A required string was present but empty
    EmptyValue {
        /// Dotted path of the offending field
        field: &'static str,
    },
    /// The logging filter could not be parsed as an `EnvFilter` directive
    InvalidLogFilter {
        /// The directive as written in the config file
        filter: String,
        /// Parser message
        reason: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::ZeroTimeout { field } => {
                write!(f, "'{}' must be greater than zero", field)
            }
            ValidationError::EmptyValue { field } => {
                write!(f, "'{}' must not be empty", field)
            }
            ValidationError::InvalidLogFilter { filter, reason } => {
                write!(f, "Invalid logging filter '{}': {}", filter, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors from loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config format '{}': expected .yaml, .yml or .toml", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Configuration validation failed:\n{}", render(.0))]
    Validation(Vec<ValidationError>),
}

fn render(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
