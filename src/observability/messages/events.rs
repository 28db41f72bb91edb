// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for event emission.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A subscriber callback panicked during `emit`; it has been revoked.
///
/// # Log Level
/// `warn!` - Recoverable problem in caller-supplied code
pub struct SubscriberPanicked<'a> {
    pub message: &'a str,
}

impl Display for SubscriberPanicked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Event subscriber panicked and was revoked: {}", self.message)
    }
}

impl StructuredLog for SubscriberPanicked<'_> {
    fn log(&self) {
        tracing::warn!(panic = self.message, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("events", span_name = name)
    }
}
