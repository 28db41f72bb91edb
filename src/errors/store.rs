// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by [`TypedStore`](crate::store::TypedStore) lookups and writes.

use thiserror::Error;

/// Failures from a typed store access.
///
/// Both variants are synchronous and leave the store untouched, so a caller can
/// always recover by falling back to `try_get`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No entry exists under the requested key
    #[error("Key '{key}' not found in store")]
    KeyNotFound { key: String },

    /// The key exists but was first written with a different type
    #[error("Key '{key}' holds a value of type '{stored}', not '{requested}'")]
    TypeMismatch {
        key: String,
        stored: &'static str,
        requested: &'static str,
    },
}
