// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concurrent refresh of many stores

use crate::error::EngineError;
use crate::poll::refresh_store;
use crate::progress::{ProgressEvent, ProgressSink};
use chrono::Utc;
use dsr_adapters::StoreClient;
use dsr_core::{PollConfig, RefreshOutcome, RefreshTarget};

/// Runs one refresh task per target and gathers every outcome
#[derive(Clone)]
pub struct Orchestrator<C> {
    client: C,
    config: PollConfig,
    progress: ProgressSink,
}

impl<C: StoreClient> Orchestrator<C> {
    pub fn new(client: C, config: PollConfig) -> Self {
        if config.is_tight() {
            tracing::warn!(
                interval_secs = config.status_check_interval.as_secs(),
                timeout_secs = config.max_refresh_timeout.as_secs(),
                "refresh timeout allows at most one status check"
            );
        }

        Self {
            client,
            config,
            progress: ProgressSink::noop(),
        }
    }

    /// Stream progress events into `sink`
    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.progress = sink;
        self
    }

    pub fn config(&self) -> PollConfig {
        self.config
    }

    /// Refresh every target concurrently
    ///
    /// Returns once the slowest refresh is terminal. Outcomes are in target
    /// order. A task that dies yields a `Failed` outcome for its store only.
    pub async fn run_all(&self, targets: Vec<RefreshTarget>) -> Result<Vec<RefreshOutcome>, EngineError> {
        if targets.is_empty() {
            return Err(EngineError::NoTargets);
        }

        tracing::info!(count = targets.len(), "starting refreshes");

        let handles: Vec<_> = targets
            .into_iter()
            .map(|target| {
                let client = self.client.clone();
                let progress = self.progress.clone();
                let config = self.config;
                let spawned_at = Utc::now();
                let task_target = target.clone();
                let handle = tokio::spawn(async move {
                    refresh_store(&client, &task_target, config, &progress).await
                });
                (target, spawned_at, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (target, spawned_at, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(store_id = %target.id, error = %e, "refresh task aborted");
                    let outcome =
                        RefreshOutcome::failed(&target, spawned_at, format!("refresh task aborted: {}", e));
                    self.progress
                        .emit(ProgressEvent::Finished(outcome.clone()));
                    outcome
                }
            };
            outcomes.push(outcome);
        }

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        tracing::info!(total = outcomes.len(), succeeded, "refreshes finished");

        Ok(outcomes)
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
