// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Refresh lifecycle and per-store outcomes

use crate::store::RefreshTarget;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Lifecycle of a single store's refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshState {
    /// Created, trigger not yet acknowledged
    Pending,
    /// Trigger acknowledged, polling
    InProgress,
    Succeeded,
    Failed,
    TimedOut,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid refresh transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: RefreshState,
    pub to: RefreshState,
}

impl RefreshState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RefreshState::Succeeded | RefreshState::Failed | RefreshState::TimedOut
        )
    }

    /// Move to `next`, rejecting anything that leaves a terminal state
    pub fn advance(self, next: RefreshState) -> Result<RefreshState, InvalidTransition> {
        use RefreshState::*;

        match (self, next) {
            (Pending, InProgress) | (Pending, Failed) => Ok(next),
            (InProgress, Succeeded) | (InProgress, Failed) | (InProgress, TimedOut) => Ok(next),
            // Polling iterations stay in progress
            (InProgress, InProgress) => Ok(next),
            (from, to) => Err(InvalidTransition { from, to }),
        }
    }
}

impl fmt::Display for RefreshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RefreshState::Pending => "pending",
            RefreshState::InProgress => "in_progress",
            RefreshState::Succeeded => "succeeded",
            RefreshState::Failed => "failed",
            RefreshState::TimedOut => "timed_out",
        };
        f.write_str(s)
    }
}

/// Terminal result of a refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefreshResult {
    Success,
    Failed { reason: String },
    TimedOut,
}

impl RefreshResult {
    pub fn state(&self) -> RefreshState {
        match self {
            RefreshResult::Success => RefreshState::Succeeded,
            RefreshResult::Failed { .. } => RefreshState::Failed,
            RefreshResult::TimedOut => RefreshState::TimedOut,
        }
    }
}

/// Outcome of one store's refresh, handed to the reporter once terminal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshOutcome {
    pub store_id: String,
    pub store_name: String,
    pub started_at: DateTime<Utc>,
    /// Last status observed while polling, if any
    pub final_status: Option<String>,
    pub result: RefreshResult,
    #[serde(rename = "duration_seconds", serialize_with = "serialize_secs")]
    pub duration: Duration,
    /// Number of successful status observations
    pub status_checks: u32,
    pub initial_chunks: u64,
    pub final_chunks: Option<u64>,
}

impl RefreshOutcome {
    /// Outcome for a store whose refresh never got past the trigger
    pub fn failed(target: &RefreshTarget, started_at: DateTime<Utc>, reason: impl Into<String>) -> Self {
        Self {
            store_id: target.id.clone(),
            store_name: target.name.clone(),
            started_at,
            final_status: None,
            result: RefreshResult::Failed {
                reason: reason.into(),
            },
            duration: Duration::ZERO,
            status_checks: 0,
            initial_chunks: target.initial_chunks,
            final_chunks: None,
        }
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    pub fn is_success(&self) -> bool {
        self.result == RefreshResult::Success
    }

    /// Human-readable failure or timeout reason
    pub fn reason(&self) -> Option<String> {
        match &self.result {
            RefreshResult::Success => None,
            RefreshResult::Failed { reason } => Some(reason.clone()),
            RefreshResult::TimedOut => Some(format!(
                "Timeout after {}",
                crate::format::format_elapsed(self.duration)
            )),
        }
    }

    /// Change in chunk count between trigger and the last observation
    pub fn chunk_delta(&self) -> Option<i64> {
        self.final_chunks
            .map(|last| last as i64 - self.initial_chunks as i64)
    }
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
