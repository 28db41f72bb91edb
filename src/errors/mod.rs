// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod store;
mod task;
mod transport;

pub use config::{ConfigError, ValidationError};
pub use store::StoreError;
pub use task::TaskError;
pub(crate) use task::panic_message;
pub use transport::TransportError;
