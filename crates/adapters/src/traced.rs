// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::store::{ClientError, StoreClient};
use async_trait::async_trait;
use dsr_core::DocumentStore;
use tracing::Instrument;

/// Wrapper that adds tracing to any StoreClient
#[derive(Clone)]
pub struct TracedStoreClient<C> {
    inner: C,
}

impl<C> TracedStoreClient<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: StoreClient> StoreClient for TracedStoreClient<C> {
    async fn list_stores(&self) -> Result<Vec<DocumentStore>, ClientError> {
        let span = tracing::info_span!("store.list");

        async {
            let start = std::time::Instant::now();
            let result = self.inner.list_stores().await;
            let elapsed = start.elapsed();

            match &result {
                Ok(stores) => tracing::info!(
                    count = stores.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "stores listed"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "list failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn get_store(&self, id: &str) -> Result<DocumentStore, ClientError> {
        let span = tracing::debug_span!("store.get", store_id = id);

        async {
            // Precondition: id must be non-empty
            if id.trim().is_empty() {
                tracing::error!("empty store id");
                return Err(ClientError::NotFound("empty store id".to_string()));
            }

            let result = self.inner.get_store(id).await;
            match &result {
                Ok(store) => tracing::debug!(status = %store.status, chunks = store.total_chunks, "fetched"),
                // Poll failures are retried by the caller
                Err(e) => tracing::warn!(error = %e, "fetch failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn trigger_refresh(&self, id: &str) -> Result<(), ClientError> {
        let span = tracing::info_span!("store.trigger_refresh", store_id = id);

        async {
            if id.trim().is_empty() {
                tracing::error!("empty store id");
                return Err(ClientError::NotFound("empty store id".to_string()));
            }

            tracing::info!("triggering");

            let start = std::time::Instant::now();
            let result = self.inner.trigger_refresh(id).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    "refresh triggered"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "trigger failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
