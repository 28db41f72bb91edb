// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Local-socket transport on Unix domain sockets.
//!
//! The wire contract is deliberately minimal: the client writes its request and
//! half-closes, the server reads to EOF, writes its reply and closes. Payloads
//! are opaque bytes.
//!
//! * [`LocalSocketServer`] serves requests with a synchronous handler until it is
//!   shut down, then removes its socket file.
//! * [`SocketRequest`] is an [`AsyncJob`] performing one exchange; wrapped in an
//!   [`AsyncTask`](crate::tasks::AsyncTask) it becomes a chain entry.

use async_trait::async_trait;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::config::consts::{DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_IO_TIMEOUT_MS};
use crate::config::SocketConfig;
use crate::errors::TransportError;
use crate::observability::messages::{transport::*, StructuredLog};
use crate::store::TypedStore;
use crate::traits::AsyncJob;

/// Result key holding the reply bytes (`Vec<u8>`).
pub const RESPONSE_KEY: &str = "response";

/// Result key holding the reply length (`usize`).
pub const RESPONSE_LEN_KEY: &str = "response_len";

type Handler = Arc<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync>;

pub struct LocalSocketServer {
    path: PathBuf,
    identity: Option<SocketIdentity>,
    cancel: CancellationToken,
    accept_loop: Option<JoinHandle<()>>,
}

impl LocalSocketServer {
    /// Bind `path` and start serving on the current tokio runtime.
    ///
    /// A leftover file at `path` is removed first, unless a server still answers
    /// on it: then binding fails with [`TransportError::Bind`] and the live
    /// socket is left alone. That liveness check connects and hangs up, so the
    /// running server sees one empty request.
    pub async fn bind<F>(path: impl Into<PathBuf>, handler: F) -> Result<Self, TransportError>
    where
        F: Fn(&[u8]) -> Vec<u8> + Send + Sync + 'static,
    {
        let path = path.into();
        clear_stale_socket(&path).await?;

        let listener = UnixListener::bind(&path).map_err(|source| TransportError::Bind {
            path: path.clone(),
            source,
        })?;
        let identity = SocketIdentity::of(&path).ok();
        SocketBound { path: &path }.log();

        let cancel = CancellationToken::new();
        let accept_loop = tokio::spawn(serve(listener, Arc::new(handler), cancel.clone()));

        Ok(Self {
            path,
            identity,
            cancel,
            accept_loop: Some(accept_loop),
        })
    }

    /// Bind the path configured in `config`.
    pub async fn from_config<F>(config: &SocketConfig, handler: F) -> Result<Self, TransportError>
    where
        F: Fn(&[u8]) -> Vec<u8> + Send + Sync + 'static,
    {
        Self::bind(config.path.clone(), handler).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stop accepting, wait for the accept loop to exit and remove the socket file.
    ///
    /// Connections already accepted finish on their own.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(accept_loop) = self.accept_loop.take() {
            let _ = accept_loop.await;
        }
        self.release_path();
    }

    /// Unlink the socket file if it is still the one this server bound.
    ///
    /// Another server may have taken over the path since; its file is kept.
    fn release_path(&mut self) {
        let Some(bound) = self.identity.take() else {
            return;
        };
        match SocketIdentity::of(&self.path) {
            Ok(current) if current == bound => remove_socket_file(&self.path),
            Ok(_) => SocketFileKept { path: &self.path }.log(),
            Err(_) => {}
        }
    }
}

impl Drop for LocalSocketServer {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.release_path();
    }
}

/// Device and inode of a socket file, fixed at bind time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SocketIdentity {
    dev: u64,
    ino: u64,
}

impl SocketIdentity {
    fn of(path: &Path) -> io::Result<Self> {
        let meta = std::fs::symlink_metadata(path)?;
        Ok(Self {
            dev: meta.dev(),
            ino: meta.ino(),
        })
    }
}

/// Remove a leftover file at `path`, refusing if a server still answers there.
async fn clear_stale_socket(path: &Path) -> Result<(), TransportError> {
    if std::fs::symlink_metadata(path).is_err() {
        return Ok(());
    }

    let wait = Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS);
    match timeout(wait, UnixStream::connect(path)).await {
        // a pending connect means a listener with a full backlog
        Ok(Ok(_)) | Err(_) => Err(TransportError::Bind {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "socket is already being served"),
        }),
        Ok(Err(_)) => {
            remove_socket_file(path);
            Ok(())
        }
    }
}

impl std::fmt::Debug for LocalSocketServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSocketServer")
            .field("path", &self.path)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

fn remove_socket_file(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove socket file")
        }
    }
}

async fn serve(listener: UnixListener, handler: Handler, cancel: CancellationToken) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, _)) => {
                    let handler = Arc::clone(&handler);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, handler).await {
                            ConnectionFailed { error: &e }.log();
                        }
                    });
                }
                Err(e) => ConnectionFailed { error: &e }.log(),
            },
        }
    }
}

async fn handle_connection(mut stream: UnixStream, handler: Handler) -> Result<(), TransportError> {
    let mut request = Vec::new();
    stream
        .read_to_end(&mut request)
        .await
        .map_err(|source| TransportError::Io {
            operation: "read request",
            source,
        })?;

    let reply = handler(&request);

    stream
        .write_all(&reply)
        .await
        .map_err(|source| TransportError::Io {
            operation: "write reply",
            source,
        })?;
    stream.shutdown().await.map_err(|source| TransportError::Io {
        operation: "close",
        source,
    })?;

    RequestServed {
        request_bytes: request.len(),
        reply_bytes: reply.len(),
    }
    .log();
    Ok(())
}

/// One request/reply exchange with a [`LocalSocketServer`].
///
/// On success the reply is stored under [`RESPONSE_KEY`] and its length under
/// [`RESPONSE_LEN_KEY`]. A refused connection or an elapsed timeout fails the job.
#[derive(Debug, Clone)]
pub struct SocketRequest {
    name: String,
    path: PathBuf,
    payload: Vec<u8>,
    connect_timeout: Duration,
    io_timeout: Duration,
}

impl SocketRequest {
    pub fn new(path: impl Into<PathBuf>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            name: "socket_request".to_string(),
            path: path.into(),
            payload: payload.into(),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            io_timeout: Duration::from_millis(DEFAULT_IO_TIMEOUT_MS),
        }
    }

    /// A request to the configured socket, with the configured timeouts.
    pub fn from_config(config: &SocketConfig, payload: impl Into<Vec<u8>>) -> Self {
        Self::new(config.path.clone(), payload)
            .with_timeouts(config.connect_timeout(), config.io_timeout())
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, io: Duration) -> Self {
        self.connect_timeout = connect;
        self.io_timeout = io;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn exchange(&self) -> Result<Vec<u8>, TransportError> {
        let mut stream = timeout(self.connect_timeout, UnixStream::connect(&self.path))
            .await
            .map_err(|_| TransportError::TimedOut {
                operation: "connect",
                timeout: self.connect_timeout,
            })?
            .map_err(|source| TransportError::Connect {
                path: self.path.clone(),
                source,
            })?;

        let io = async {
            stream
                .write_all(&self.payload)
                .await
                .map_err(|source| TransportError::Io {
                    operation: "write request",
                    source,
                })?;
            // half-close so the server sees EOF
            stream.shutdown().await.map_err(|source| TransportError::Io {
                operation: "half-close",
                source,
            })?;

            let mut reply = Vec::new();
            stream
                .read_to_end(&mut reply)
                .await
                .map_err(|source| TransportError::Io {
                    operation: "read reply",
                    source,
                })?;
            Ok::<_, TransportError>(reply)
        };

        timeout(self.io_timeout, io)
            .await
            .map_err(|_| TransportError::TimedOut {
                operation: "exchange",
                timeout: self.io_timeout,
            })?
    }
}

#[async_trait]
impl AsyncJob for SocketRequest {
    async fn run(&self, output: &mut TypedStore) -> anyhow::Result<()> {
        let start_time = Instant::now();
        let reply = self.exchange().await?;

        ReplyReceived {
            path: &self.path,
            request_bytes: self.payload.len(),
            reply_bytes: reply.len(),
            duration: start_time.elapsed(),
        }
        .log();

        output.set(RESPONSE_LEN_KEY.to_string(), reply.len())?;
        output.set(RESPONSE_KEY.to_string(), reply)?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
