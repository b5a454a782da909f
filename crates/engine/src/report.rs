// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-of-run summary

use dsr_core::format::{format_count, format_delta, format_elapsed};
use dsr_core::{RefreshOutcome, RefreshResult};
use serde::Serialize;
use std::fmt;

const RULE_WIDTH: usize = 80;

/// Aggregate of every store's outcome, in the order the stores were selected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshReport {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub timed_out: usize,
    /// Fraction of stores that succeeded, 0.0 for an empty run
    pub success_rate: f64,
    pub stores: Vec<RefreshOutcome>,
}

impl RefreshReport {
    pub fn summarize(outcomes: &[RefreshOutcome]) -> Self {
        let mut report = Self {
            total: outcomes.len(),
            successful: 0,
            failed: 0,
            timed_out: 0,
            success_rate: 0.0,
            stores: outcomes.to_vec(),
        };

        for outcome in outcomes {
            match outcome.result {
                RefreshResult::Success => report.successful += 1,
                RefreshResult::Failed { .. } => report.failed += 1,
                RefreshResult::TimedOut => report.timed_out += 1,
            }
        }

        if report.total > 0 {
            report.success_rate = report.successful as f64 / report.total as f64;
        }

        report
    }

    /// No store failed or timed out
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.timed_out == 0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn write_outcome(f: &mut fmt::Formatter<'_>, outcome: &RefreshOutcome) -> fmt::Result {
    let icon = match outcome.result {
        RefreshResult::Success => "✓",
        RefreshResult::Failed { .. } => "✗",
        RefreshResult::TimedOut => "⏱",
    };
    let final_chunks = outcome.final_chunks.unwrap_or(outcome.initial_chunks);

    writeln!(f, "{} {}", icon, outcome.store_name)?;
    writeln!(f, "   Duration: {}", format_elapsed(outcome.duration))?;
    writeln!(f, "   Status Checks: {}", outcome.status_checks)?;
    writeln!(f, "   Initial Chunks: {}", format_count(outcome.initial_chunks))?;
    writeln!(f, "   Final Chunks: {}", format_count(final_chunks))?;

    match outcome.chunk_delta().unwrap_or(0) {
        0 => writeln!(f, "   Chunks Changed: No change")?,
        delta if delta > 0 => writeln!(f, "   Chunks Added: {}", format_delta(delta))?,
        delta => writeln!(f, "   Chunks Changed: {}", format_delta(delta))?,
    }

    let last_status = outcome.final_status.as_deref().unwrap_or("UNKNOWN");
    match &outcome.result {
        RefreshResult::Success => writeln!(f, "   Result: SUCCESS - Final Status: {}", last_status),
        RefreshResult::Failed { reason } => writeln!(f, "   Result: FAILED - {}", reason),
        RefreshResult::TimedOut => writeln!(
            f,
            "   Result: TIMED OUT - {} (last status: {})",
            outcome.reason().unwrap_or_default(),
            last_status
        ),
    }
}

impl fmt::Display for RefreshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{}", rule)?;
        writeln!(f, "Refresh Summary")?;
        writeln!(f, "{}", rule)?;

        for outcome in &self.stores {
            write_outcome(f, outcome)?;
            writeln!(f)?;
        }

        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "Total: {} | Successful: {} | Failed: {} | Timed out: {} | Success rate: {:.1}%",
            self.total,
            self.successful,
            self.failed,
            self.timed_out,
            self.success_rate * 100.0
        )?;
        write!(f, "{}", rule)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
