// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration: poll cadence and connection settings

mod poll;
mod settings;

pub use poll::PollConfig;
pub use settings::{Settings, ENV_API_KEY, ENV_BASE_URL, ENV_DEBUG, ENV_INTERVAL, ENV_MAX_POLL_FAILURES, ENV_TIMEOUT};

use thiserror::Error;

/// Errors from building configuration. Any of these aborts a run before
/// a single refresh is started.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{var} is not a valid http(s) URL: {value}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} must be a whole number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),
}
