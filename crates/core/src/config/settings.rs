// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{ConfigError, PollConfig};
use std::fmt;
use std::time::Duration;

pub const ENV_BASE_URL: &str = "FLOWISE_BASE_URL";
pub const ENV_API_KEY: &str = "FLOWISE_API_KEY";
pub const ENV_INTERVAL: &str = "STATUS_CHECK_INTERVAL";
pub const ENV_TIMEOUT: &str = "MAX_REFRESH_TIMEOUT";
pub const ENV_MAX_POLL_FAILURES: &str = "MAX_POLL_FAILURES";
pub const ENV_DEBUG: &str = "DEBUG";

/// Process-wide settings, read once at startup
#[derive(Clone)]
pub struct Settings {
    /// API root without trailing slash
    pub base_url: String,
    pub api_key: String,
    pub poll: PollConfig,
    pub debug: bool,
}

impl Settings {
    /// Load from the process environment, after merging a `.env` file from
    /// the working directory if one exists
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = present(ENV_BASE_URL).ok_or(ConfigError::Missing(ENV_BASE_URL))?;
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                var: ENV_BASE_URL,
                value: base_url,
            });
        }

        let api_key = present(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;

        let defaults = PollConfig::default();
        let poll = PollConfig {
            status_check_interval: match present(ENV_INTERVAL) {
                Some(v) => Duration::from_secs(parse_number(ENV_INTERVAL, &v)?),
                None => defaults.status_check_interval,
            },
            max_refresh_timeout: match present(ENV_TIMEOUT) {
                Some(v) => Duration::from_secs(parse_number(ENV_TIMEOUT, &v)?),
                None => defaults.max_refresh_timeout,
            },
            max_consecutive_poll_failures: match present(ENV_MAX_POLL_FAILURES) {
                Some(v) => u32::try_from(parse_number(ENV_MAX_POLL_FAILURES, &v)?).map_err(|_| {
                    ConfigError::InvalidNumber {
                        var: ENV_MAX_POLL_FAILURES,
                        value: v.clone(),
                    }
                })?,
                None => defaults.max_consecutive_poll_failures,
            },
        };
        poll.validate()?;

        let debug = present(ENV_DEBUG).is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

        Ok(Self {
            base_url,
            api_key: api_key.trim().to_string(),
            poll,
            debug,
        })
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        })
}

// Never print the credential
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("poll", &self.poll)
            .field("debug", &self.debug)
            .finish()
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
