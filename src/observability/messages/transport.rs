// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the local-socket transport.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;
use tracing::Span;

/// Server bound its listening socket.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SocketBound<'a> {
    pub path: &'a Path,
}

impl Display for SocketBound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Listening on local socket '{}'", self.path.display())
    }
}

impl StructuredLog for SocketBound<'_> {
    fn log(&self) {
        tracing::info!(path = %self.path.display(), "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("socket_server", span_name = name, path = %self.path.display())
    }
}

/// Server left its socket path alone because another server now owns it.
///
/// # Log Level
/// `debug!` - Expected when a path is rebound before the old server exits
pub struct SocketFileKept<'a> {
    pub path: &'a Path,
}

impl Display for SocketFileKept<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Socket file '{}' was rebound by another server; leaving it",
            self.path.display()
        )
    }
}

impl StructuredLog for SocketFileKept<'_> {
    fn log(&self) {
        tracing::debug!(path = %self.path.display(), "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("socket_server", span_name = name, path = %self.path.display())
    }
}

/// Server answered one connection.
///
/// # Log Level
/// `debug!` - Per-connection detail
pub struct RequestServed {
    pub request_bytes: usize,
    pub reply_bytes: usize,
}

impl Display for RequestServed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Served request: {} bytes in, {} bytes out",
            self.request_bytes, self.reply_bytes
        )
    }
}

impl StructuredLog for RequestServed {
    fn log(&self) {
        tracing::debug!(
            request_bytes = self.request_bytes,
            reply_bytes = self.reply_bytes,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("request_served", span_name = name)
    }
}

/// Server failed to read or answer one connection.
///
/// # Log Level
/// `warn!` - The server keeps accepting
pub struct ConnectionFailed<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for ConnectionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Local socket connection failed: {}", self.error)
    }
}

impl StructuredLog for ConnectionFailed<'_> {
    fn log(&self) {
        tracing::warn!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("connection_failed", span_name = name, error = %self.error)
    }
}

/// Client received a reply.
///
/// # Log Level
/// `debug!` - Per-request detail
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::transport::ReplyReceived;
/// use std::path::Path;
/// use std::time::Duration;
///
/// let msg = ReplyReceived {
///     path: Path::new("/tmp/s.sock"),
///     request_bytes: 5,
///     reply_bytes: 5,
///     duration: Duration::from_millis(1),
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ReplyReceived<'a> {
    pub path: &'a Path,
    pub request_bytes: usize,
    pub reply_bytes: usize,
    pub duration: Duration,
}

impl Display for ReplyReceived<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Reply from '{}': {} bytes sent, {} bytes received in {:?}",
            self.path.display(),
            self.request_bytes,
            self.reply_bytes,
            self.duration
        )
    }
}

impl StructuredLog for ReplyReceived<'_> {
    fn log(&self) {
        tracing::debug!(
            path = %self.path.display(),
            request_bytes = self.request_bytes,
            reply_bytes = self.reply_bytes,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "socket_request",
            span_name = name,
            path = %self.path.display(),
        )
    }
}
