// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document store status and refreshability classification.
//!
//! The remote API reports a store's status as a free-form string. Known
//! values map onto [`StoreStatus`]; anything else is carried through as
//! [`StoreStatus::Other`] so new server-side statuses never break parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason attached to statuses the classifier does not know how to refresh
pub const UNSUPPORTED_REASON: &str = "unsupported status for refresh";

/// Status of a document store as reported by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreStatus {
    New,
    Empty,
    Sync,
    Syncing,
    Upserted,
    Upserting,
    Stale,
    Other(String),
}

/// Coarse grouping of statuses used for refresh decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// Stable; a refresh can be started now
    Refreshable,
    /// An operation is already running on the store
    Busy,
    /// Waiting for an external update cycle
    Waiting,
    /// Not a status we refresh from
    Unsupported,
}

impl StoreStatus {
    /// Parse a raw status string. Matching is case-insensitive and never fails.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "NEW" => StoreStatus::New,
            "EMPTY" => StoreStatus::Empty,
            "SYNC" => StoreStatus::Sync,
            "SYNCING" => StoreStatus::Syncing,
            "UPSERTED" => StoreStatus::Upserted,
            "UPSERTING" => StoreStatus::Upserting,
            "STALE" => StoreStatus::Stale,
            _ => StoreStatus::Other(normalized),
        }
    }

    /// Canonical uppercase name
    pub fn as_str(&self) -> &str {
        match self {
            StoreStatus::New => "NEW",
            StoreStatus::Empty => "EMPTY",
            StoreStatus::Sync => "SYNC",
            StoreStatus::Syncing => "SYNCING",
            StoreStatus::Upserted => "UPSERTED",
            StoreStatus::Upserting => "UPSERTING",
            StoreStatus::Stale => "STALE",
            StoreStatus::Other(s) => s.as_str(),
        }
    }

    pub fn class(&self) -> StatusClass {
        match self {
            StoreStatus::Sync | StoreStatus::Upserted | StoreStatus::Empty => {
                StatusClass::Refreshable
            }
            StoreStatus::Syncing | StoreStatus::Upserting => StatusClass::Busy,
            StoreStatus::Stale => StatusClass::Waiting,
            StoreStatus::New | StoreStatus::Other(_) => StatusClass::Unsupported,
        }
    }

    pub fn is_refreshable(&self) -> bool {
        self.class() == StatusClass::Refreshable
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for StoreStatus {
    fn from(raw: &str) -> Self {
        StoreStatus::parse(raw)
    }
}

impl StatusClass {
    /// Human-readable explanation for the classification
    pub fn reason(&self) -> &'static str {
        match self {
            StatusClass::Refreshable => "ready for refresh",
            StatusClass::Busy => "refresh already in progress",
            StatusClass::Waiting => "awaiting an external update cycle",
            StatusClass::Unsupported => UNSUPPORTED_REASON,
        }
    }
}

/// Result of classifying a status for refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Refreshability {
    pub refreshable: bool,
    pub reason: &'static str,
}

/// Decide whether a store in `status` can be refreshed right now
pub fn classify(status: &str) -> Refreshability {
    let class = StoreStatus::parse(status).class();
    Refreshability {
        refreshable: class == StatusClass::Refreshable,
        reason: class.reason(),
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
