// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

fn load(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| vars.get(key).cloned())
}

const REQUIRED: [(&str, &str); 2] = [
    (ENV_BASE_URL, "https://flowise.example.com/"),
    (ENV_API_KEY, "secret-key"),
];

#[test]
fn loads_required_values_with_defaults() {
    let settings = load(&REQUIRED).unwrap();

    assert_eq!(settings.base_url, "https://flowise.example.com");
    assert_eq!(settings.api_key, "secret-key");
    assert_eq!(settings.poll, PollConfig::default());
    assert!(!settings.debug);
}

#[test]
fn missing_base_url() {
    let err = load(&[(ENV_API_KEY, "k")]).unwrap_err();
    assert_eq!(err, ConfigError::Missing(ENV_BASE_URL));
    assert_eq!(err.to_string(), "FLOWISE_BASE_URL is not set");
}

#[test]
fn blank_api_key_counts_as_missing() {
    let err = load(&[(ENV_BASE_URL, "http://localhost:3000"), (ENV_API_KEY, "  ")]).unwrap_err();
    assert_eq!(err, ConfigError::Missing(ENV_API_KEY));
}

#[test]
fn base_url_must_be_http() {
    let err = load(&[(ENV_BASE_URL, "localhost:3000"), (ENV_API_KEY, "k")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { .. }));
}

#[test]
fn poll_overrides() {
    let mut vars = REQUIRED.to_vec();
    vars.extend([
        (ENV_INTERVAL, "5"),
        (ENV_TIMEOUT, "20"),
        (ENV_MAX_POLL_FAILURES, "4"),
        (ENV_DEBUG, "TRUE"),
    ]);
    let settings = load(&vars).unwrap();

    assert_eq!(settings.poll.status_check_interval, Duration::from_secs(5));
    assert_eq!(settings.poll.max_refresh_timeout, Duration::from_secs(20));
    assert_eq!(settings.poll.max_consecutive_poll_failures, 4);
    assert!(settings.debug);
}

#[test]
fn zero_interval_is_rejected() {
    let mut vars = REQUIRED.to_vec();
    vars.push((ENV_INTERVAL, "0"));
    assert_eq!(
        load(&vars).unwrap_err(),
        ConfigError::NonPositive("status check interval")
    );
}

#[test]
fn non_numeric_timeout_is_rejected() {
    let mut vars = REQUIRED.to_vec();
    vars.push((ENV_TIMEOUT, "ten"));
    assert_eq!(
        load(&vars).unwrap_err(),
        ConfigError::InvalidNumber {
            var: ENV_TIMEOUT,
            value: "ten".to_string()
        }
    );
}

#[test]
fn debug_output_masks_api_key() {
    let settings = load(&REQUIRED).unwrap();
    let debug = format!("{:?}", settings);
    assert!(!debug.contains("secret-key"));
    assert!(debug.contains("***"));
}
