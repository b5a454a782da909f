// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Each error says what went wrong (message), why it might have happened
//! (context) and how to fix it (suggestions).

use dsr_adapters::ClientError;
use dsr_core::config::{ENV_API_KEY, ENV_BASE_URL};
use dsr_core::ConfigError;
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl CliError {
    /// Settings could not be loaded from the environment.
    pub fn config(err: ConfigError) -> Self {
        let mut error = CliError::new("Failed to load configuration").with_context(err.to_string());

        error = match &err {
            ConfigError::Missing(_) => error.with_suggestion(format!(
                "Set {} and {} in the environment or in a .env file",
                ENV_BASE_URL, ENV_API_KEY
            )),
            ConfigError::InvalidUrl { .. } => {
                error.with_suggestion(format!("Use a full URL, e.g. {}=http://localhost:3000", ENV_BASE_URL))
            }
            ConfigError::InvalidNumber { .. } | ConfigError::NonPositive(_) => {
                error.with_suggestion("Use a positive whole number of seconds")
            }
        };

        error.with_source(err)
    }

    /// The store list could not be fetched.
    pub fn fetch_failed(base_url: &str, err: ClientError) -> Self {
        let mut error = CliError::new("Failed to fetch document stores")
            .with_context(err.to_string())
            .with_context(format!("Base URL: {}", base_url));

        if let ClientError::Http { status: 401 | 403, .. } = err {
            error = error.with_suggestion(format!("Check that {} is valid", ENV_API_KEY));
        }

        error
            .with_suggestion("Check that the Flowise server is running and reachable")
            .with_source(err)
    }

    /// Input ended before the refresh was confirmed.
    pub fn unconfirmed() -> Self {
        CliError::new("Refresh was not confirmed")
            .with_context("Input ended before an answer to the confirmation prompt")
            .with_suggestion("Pass --yes to refresh without asking")
    }

    /// No store matched the `--id`/`--name` criteria.
    pub fn no_matches() -> Self {
        CliError::new("No stores matched your criteria")
            .with_context("--id matches a full id or id prefix, --name a case-insensitive part of the name")
            .with_suggestion("List available stores: dsr list")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_lists_context_and_numbered_suggestions() {
        let err = CliError::new("Something went wrong")
            .with_context("First context")
            .with_context("Second context")
            .with_suggestion("Try this")
            .with_suggestion("Or this");

        let output = format!("{}", err);
        assert!(output.contains("error: Something went wrong"));
        assert!(output.contains("-> First context"));
        assert!(output.contains("-> Second context"));
        assert!(output.contains("1. Try this"));
        assert!(output.contains("2. Or this"));
    }

    #[test]
    fn missing_config_names_both_variables() {
        let output = CliError::config(ConfigError::Missing(ENV_BASE_URL)).to_string();
        assert!(output.contains("FLOWISE_BASE_URL is not set"));
        assert!(output.contains("FLOWISE_API_KEY"));
        assert!(output.contains(".env"));
    }

    #[test]
    fn unauthorized_fetch_suggests_checking_the_key() {
        let err = ClientError::Http {
            status: 401,
            body: "Unauthorized".to_string(),
        };
        let output = CliError::fetch_failed("http://flowise:3000", err).to_string();
        assert!(output.contains("HTTP 401: Unauthorized"));
        assert!(output.contains("Base URL: http://flowise:3000"));
        assert!(output.contains("Check that FLOWISE_API_KEY is valid"));
    }

    #[test]
    fn unconfirmed_suggests_yes_flag() {
        let output = CliError::unconfirmed().to_string();
        assert!(output.contains("error: Refresh was not confirmed"));
        assert!(output.contains("1. Pass --yes to refresh without asking"));
    }

    #[test]
    fn transport_fetch_does_not_blame_the_key() {
        let err = ClientError::Transport("connection refused".to_string());
        let output = CliError::fetch_failed("http://flowise:3000", err).to_string();
        assert!(!output.contains("FLOWISE_API_KEY"));
        assert!(output.contains("server is running"));
    }
}
