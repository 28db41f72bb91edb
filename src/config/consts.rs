// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Chain name used when the config file does not give one
pub const DEFAULT_CHAIN_NAME: &str = "chain";
/// Socket path used when the config file does not give one
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/the-switchboard.sock";
/// Default connect timeout for local-socket requests (1 second)
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 1_000;
/// Default read/write timeout for local-socket requests (5 seconds)
pub const DEFAULT_IO_TIMEOUT_MS: u64 = 5_000;
/// Tracing filter applied when neither RUST_LOG nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "info";
