// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::ConfigError;
use std::time::Duration;

/// Default delay between status checks
pub const DEFAULT_STATUS_CHECK_INTERVAL: Duration = Duration::from_secs(15);
/// Default per-store refresh budget
pub const DEFAULT_MAX_REFRESH_TIMEOUT: Duration = Duration::from_secs(600);
/// Consecutive failed status checks tolerated before a refresh is failed
pub const DEFAULT_MAX_POLL_FAILURES: u32 = 3;

/// Poll cadence shared read-only by every refresh task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub status_check_interval: Duration,
    pub max_refresh_timeout: Duration,
    pub max_consecutive_poll_failures: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            status_check_interval: DEFAULT_STATUS_CHECK_INTERVAL,
            max_refresh_timeout: DEFAULT_MAX_REFRESH_TIMEOUT,
            max_consecutive_poll_failures: DEFAULT_MAX_POLL_FAILURES,
        }
    }
}

impl PollConfig {
    /// Build a validated config from whole seconds
    pub fn from_secs(interval: u64, timeout: u64) -> Result<Self, ConfigError> {
        let config = Self {
            status_check_interval: Duration::from_secs(interval),
            max_refresh_timeout: Duration::from_secs(timeout),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_poll_failures(self, max: u32) -> Result<Self, ConfigError> {
        let config = Self {
            max_consecutive_poll_failures: max,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.status_check_interval.is_zero() {
            return Err(ConfigError::NonPositive("status check interval"));
        }
        if self.max_refresh_timeout.is_zero() {
            return Err(ConfigError::NonPositive("refresh timeout"));
        }
        if self.max_consecutive_poll_failures == 0 {
            return Err(ConfigError::NonPositive("max poll failures"));
        }
        Ok(())
    }

    /// A timeout shorter than two intervals leaves room for at most one status check
    pub fn is_tight(&self) -> bool {
        self.status_check_interval
            .checked_mul(2)
            .is_some_and(|two_intervals| self.max_refresh_timeout < two_intervals)
    }
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
