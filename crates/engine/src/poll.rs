// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-store refresh: trigger, then poll until terminal or timed out

use crate::progress::{ProgressEvent, ProgressSink};
use chrono::Utc;
use dsr_adapters::StoreClient;
use dsr_core::{PollConfig, RefreshOutcome, RefreshResult, RefreshState, RefreshTarget, StoreStatus};
use tokio::time::Instant;
use tracing::Instrument;

/// Refresh one store and report how it ended
///
/// Trigger failures end the refresh immediately with a `Failed` outcome and
/// no status checks. Otherwise the store is checked once per interval, the
/// first check coming one full interval after the trigger. The timeout is
/// only evaluated between checks, so it may be overshot by up to one interval.
pub async fn refresh_store<C: StoreClient>(
    client: &C,
    target: &RefreshTarget,
    config: PollConfig,
    progress: &ProgressSink,
) -> RefreshOutcome {
    let span = tracing::info_span!("refresh", store_id = %target.id, store = %target.name);
    run(client, target, config, progress).instrument(span).await
}

async fn run<C: StoreClient>(
    client: &C,
    target: &RefreshTarget,
    config: PollConfig,
    progress: &ProgressSink,
) -> RefreshOutcome {
    let mut state = RefreshState::Pending;
    let started_at = Utc::now();

    if let Err(e) = client.trigger_refresh(&target.id).await {
        transition(&mut state, RefreshState::Failed);
        tracing::error!(error = %e, "refresh trigger failed");
        let outcome = RefreshOutcome::failed(target, started_at, e.to_string());
        progress.emit(ProgressEvent::Finished(outcome.clone()));
        return outcome;
    }

    let start = Instant::now();
    transition(&mut state, RefreshState::InProgress);
    tracing::info!("refresh triggered");
    progress.emit(ProgressEvent::Triggered {
        store_id: target.id.clone(),
        store_name: target.name.clone(),
    });

    let mut tracker = Tracker::default();
    let result = loop {
        tokio::time::sleep(config.status_check_interval).await;

        let elapsed = start.elapsed();
        if elapsed >= config.max_refresh_timeout {
            tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                last_status = tracker.last_status.as_deref().unwrap_or("unknown"),
                "refresh timed out"
            );
            break RefreshResult::TimedOut;
        }

        match client.get_store(&target.id).await {
            Ok(store) => {
                let delta = tracker
                    .last_chunks
                    .map_or(0, |previous| store.total_chunks as i64 - previous as i64);
                tracker.observed(&store.status, store.total_chunks);
                transition(&mut state, RefreshState::InProgress);

                tracing::debug!(
                    status = %store.status,
                    check = tracker.checks,
                    chunks = store.total_chunks,
                    "status checked"
                );
                progress.emit(ProgressEvent::Polled {
                    store_id: target.id.clone(),
                    store_name: target.name.clone(),
                    status: store.status.clone(),
                    check: tracker.checks,
                    elapsed: start.elapsed(),
                    chunks: store.total_chunks,
                    delta,
                });

                if StoreStatus::parse(&store.status).is_refreshable() {
                    break RefreshResult::Success;
                }
            }
            Err(e) => {
                tracker.consecutive_failures += 1;
                tracing::warn!(
                    error = %e,
                    consecutive = tracker.consecutive_failures,
                    "status check failed"
                );
                progress.emit(ProgressEvent::PollFailed {
                    store_id: target.id.clone(),
                    store_name: target.name.clone(),
                    error: e.to_string(),
                    consecutive: tracker.consecutive_failures,
                    elapsed: start.elapsed(),
                });

                if tracker.consecutive_failures >= config.max_consecutive_poll_failures {
                    break RefreshResult::Failed {
                        reason: format!(
                            "status check failed {} times in a row: {}",
                            tracker.consecutive_failures, e
                        ),
                    };
                }
            }
        }
    };

    transition(&mut state, result.state());
    let duration = start.elapsed();
    tracing::info!(
        state = %state,
        elapsed_ms = duration.as_millis() as u64,
        checks = tracker.checks,
        "refresh finished"
    );

    let outcome = RefreshOutcome {
        store_id: target.id.clone(),
        store_name: target.name.clone(),
        started_at,
        final_status: tracker.last_status,
        result,
        duration,
        status_checks: tracker.checks,
        initial_chunks: target.initial_chunks,
        final_chunks: tracker.last_chunks,
    };
    progress.emit(ProgressEvent::Finished(outcome.clone()));
    outcome
}

/// What the polling loop has seen so far
#[derive(Default)]
struct Tracker {
    last_status: Option<String>,
    last_chunks: Option<u64>,
    checks: u32,
    consecutive_failures: u32,
}

impl Tracker {
    fn observed(&mut self, status: &str, chunks: u64) {
        self.last_status = Some(status.to_string());
        self.last_chunks = Some(chunks);
        self.checks += 1;
        self.consecutive_failures = 0;
    }
}

fn transition(state: &mut RefreshState, next: RefreshState) {
    match state.advance(next) {
        Ok(advanced) => *state = advanced,
        Err(e) => tracing::error!(error = %e, "ignoring refresh state change"),
    }
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
