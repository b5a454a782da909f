// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document store API adapters

mod http;

pub use http::HttpStoreClient;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeStoreClient, PollStep, StoreCall};

use async_trait::async_trait;
use dsr_core::DocumentStore;
use thiserror::Error;

/// Errors from the document store API
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("HTTP {status}{}", http_detail(.status, .body))]
    Http { status: u16, body: String },
    #[error("document store not found: {0}")]
    NotFound(String),
    #[error("refresh rejected: {0}")]
    Conflict(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Network, HTTP-level and decoding failures, as opposed to the
    /// definitive answers `NotFound` and `Conflict`
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_) | ClientError::Http { .. } | ClientError::Decode(_)
        )
    }
}

fn http_detail(status: &u16, body: &str) -> String {
    let mut detail = String::new();
    if !body.trim().is_empty() {
        detail.push_str(": ");
        detail.push_str(body.trim());
    }
    if *status == 500 {
        detail.push_str(
            " (the store may have no loaders configured or an invalid vector store configuration)",
        );
    }
    detail
}

/// Adapter for the remote document store API
#[async_trait]
pub trait StoreClient: Clone + Send + Sync + 'static {
    /// List every document store
    async fn list_stores(&self) -> Result<Vec<DocumentStore>, ClientError>;

    /// Fetch the current state of one store
    async fn get_store(&self, id: &str) -> Result<DocumentStore, ClientError>;

    /// Start an asynchronous refresh of one store
    async fn trigger_refresh(&self, id: &str) -> Result<(), ClientError>;
}
