// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dsr-core: domain model for the document store refresher
//!
//! This crate provides:
//! - The store model and status enumeration returned by the remote API
//! - The refreshability classifier
//! - Refresh lifecycle state and per-store outcomes
//! - Poll cadence and connection settings
//! - Pure selection helpers used by the CLI

pub mod config;
pub mod format;
pub mod outcome;
pub mod selection;
pub mod status;
pub mod store;

// Re-exports
pub use config::{ConfigError, PollConfig, Settings};
pub use outcome::{InvalidTransition, RefreshOutcome, RefreshResult, RefreshState};
pub use selection::{match_stores, parse_selection, MatchCriteria, Selection};
pub use status::{classify, Refreshability, StatusClass, StoreStatus};
pub use store::{DocumentStore, RefreshTarget};
