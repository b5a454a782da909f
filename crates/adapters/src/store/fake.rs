// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake document store client for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ClientError, StoreClient};
use async_trait::async_trait;
use dsr_core::DocumentStore;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Recorded client call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    ListStores,
    GetStore { id: String },
    TriggerRefresh { id: String },
}

/// Scripted answer to one `get_store` call
#[derive(Debug, Clone)]
pub enum PollStep {
    /// Report this status (and optionally a new chunk count)
    Status {
        status: String,
        chunks: Option<u64>,
    },
    /// Fail the call
    Error(ClientError),
}

impl PollStep {
    pub fn status(status: &str) -> Self {
        PollStep::Status {
            status: status.to_string(),
            chunks: None,
        }
    }

    pub fn status_with_chunks(status: &str, chunks: u64) -> Self {
        PollStep::Status {
            status: status.to_string(),
            chunks: Some(chunks),
        }
    }

    pub fn error(error: ClientError) -> Self {
        PollStep::Error(error)
    }
}

/// Fake store state
#[derive(Debug, Clone)]
struct FakeStore {
    store: DocumentStore,
    /// Pending `get_store` answers; once empty the store reports its last state
    script: VecDeque<PollStep>,
    trigger_error: Option<ClientError>,
}

/// Fake document store client for testing
///
/// Triggering a refresh does not change a store's status; tests drive the
/// observed statuses through [`FakeStoreClient::script`].
#[derive(Clone, Default)]
pub struct FakeStoreClient {
    stores: Arc<Mutex<Vec<FakeStore>>>,
    list_error: Arc<Mutex<Option<ClientError>>>,
    calls: Arc<Mutex<Vec<StoreCall>>>,
}

impl FakeStoreClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a store (listing order follows insertion order)
    pub fn add_store(&self, store: DocumentStore) {
        self.stores
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(FakeStore {
                store,
                script: VecDeque::new(),
                trigger_error: None,
            });
    }

    /// Convenience for adding a store with just an id, name and status
    pub fn add(&self, id: &str, name: &str, status: &str) {
        self.add_store(DocumentStore {
            id: id.to_string(),
            name: name.to_string(),
            status: status.to_string(),
            ..Default::default()
        });
    }

    /// Queue answers for successive `get_store` calls on `id`
    pub fn script(&self, id: &str, steps: impl IntoIterator<Item = PollStep>) {
        self.with_store(id, |s| s.script.extend(steps));
    }

    /// Make `trigger_refresh` on `id` fail
    pub fn fail_trigger(&self, id: &str, error: ClientError) {
        self.with_store(id, |s| s.trigger_error = Some(error));
    }

    /// Make `list_stores` fail
    pub fn fail_list(&self, error: ClientError) {
        *self.list_error.lock().unwrap_or_else(|e| e.into_inner()) = Some(error);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of `get_store` calls made for `id`
    pub fn poll_count(&self, id: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StoreCall::GetStore { id: polled } if polled == id))
            .count()
    }

    fn record(&self, call: StoreCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    fn with_store<R>(&self, id: &str, f: impl FnOnce(&mut FakeStore) -> R) -> Option<R> {
        let mut stores = self.stores.lock().unwrap_or_else(|e| e.into_inner());
        stores.iter_mut().find(|s| s.store.id == id).map(f)
    }
}

#[async_trait]
impl StoreClient for FakeStoreClient {
    async fn list_stores(&self) -> Result<Vec<DocumentStore>, ClientError> {
        self.record(StoreCall::ListStores);

        if let Some(error) = self
            .list_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Err(error);
        }

        let stores = self.stores.lock().unwrap_or_else(|e| e.into_inner());
        Ok(stores.iter().map(|s| s.store.clone()).collect())
    }

    async fn get_store(&self, id: &str) -> Result<DocumentStore, ClientError> {
        self.record(StoreCall::GetStore { id: id.to_string() });

        let answer = self.with_store(id, |s| match s.script.pop_front() {
            Some(PollStep::Status { status, chunks }) => {
                s.store.status = status;
                if let Some(chunks) = chunks {
                    s.store.total_chunks = chunks;
                }
                Ok(s.store.clone())
            }
            Some(PollStep::Error(error)) => Err(error),
            None => Ok(s.store.clone()),
        });

        answer.unwrap_or_else(|| Err(ClientError::NotFound(id.to_string())))
    }

    async fn trigger_refresh(&self, id: &str) -> Result<(), ClientError> {
        self.record(StoreCall::TriggerRefresh { id: id.to_string() });

        match self.with_store(id, |s| s.trigger_error.clone()) {
            None => Err(ClientError::NotFound(id.to_string())),
            Some(Some(error)) => Err(error),
            Some(None) => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
