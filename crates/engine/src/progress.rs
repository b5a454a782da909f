// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress events streamed from running refreshes

use dsr_core::RefreshOutcome;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Something observable happened to one store's refresh
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// The remote accepted the trigger
    Triggered { store_id: String, store_name: String },
    /// A status check answered
    Polled {
        store_id: String,
        store_name: String,
        status: String,
        /// 1-based number of this successful check
        check: u32,
        elapsed: Duration,
        chunks: u64,
        /// Chunk change since the previous check
        delta: i64,
    },
    /// A status check failed
    PollFailed {
        store_id: String,
        store_name: String,
        error: String,
        consecutive: u32,
        elapsed: Duration,
    },
    /// The refresh reached a terminal result
    Finished(RefreshOutcome),
}

impl ProgressEvent {
    pub fn store_id(&self) -> &str {
        match self {
            ProgressEvent::Triggered { store_id, .. }
            | ProgressEvent::Polled { store_id, .. }
            | ProgressEvent::PollFailed { store_id, .. } => store_id,
            ProgressEvent::Finished(outcome) => &outcome.store_id,
        }
    }
}

/// Non-blocking sender for progress events
///
/// A full or closed channel drops the event; progress never slows a refresh.
#[derive(Debug, Clone, Default)]
pub struct ProgressSink {
    tx: Option<mpsc::Sender<ProgressEvent>>,
}

impl ProgressSink {
    /// Create a sink and the receiver that drains it
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx: Some(tx) }, rx)
    }

    /// A sink that discards everything
    pub fn noop() -> Self {
        Self { tx: None }
    }

    pub fn emit(&self, event: ProgressEvent) {
        let Some(tx) = &self.tx else {
            return;
        };

        match tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::debug!(store_id = event.store_id(), "progress channel full, dropping event");
            }
            Err(TrySendError::Closed(event)) => {
                tracing::debug!(store_id = event.store_id(), "progress receiver gone, dropping event");
            }
        }
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
