// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::store::TypedStore;

/// Asynchronous work that fills a result store.
///
/// Jobs are wrapped in an [`AsyncTask`](crate::tasks::AsyncTask), which drives
/// them to completion on a tokio runtime so they can take part in a chain.
#[async_trait]
pub trait AsyncJob: Send + Sync {
    async fn run(&self, output: &mut TypedStore) -> anyhow::Result<()>;

    fn name(&self) -> &str;
}
