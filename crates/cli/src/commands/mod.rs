// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod list;
pub mod refresh;

use crate::error::CliError;
use dsr_adapters::StoreClient;
use dsr_core::DocumentStore;

/// Fetch every store, turning failures into a user-facing error
pub async fn fetch_stores<C: StoreClient>(client: &C, base_url: &str) -> Result<Vec<DocumentStore>, CliError> {
    let stores = client
        .list_stores()
        .await
        .map_err(|e| CliError::fetch_failed(base_url, e))?;
    tracing::info!(count = stores.len(), "fetched document stores");
    Ok(stores)
}
