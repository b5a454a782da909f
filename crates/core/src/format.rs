// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display helpers shared by progress and summary output

use std::time::Duration;

/// Compact elapsed time: `42s`, `3m 5s`, `1h 2m`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Integer with thousands separators: `1,234,567`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Signed variant of [`format_count`], always carrying a sign: `+12`, `-1,024`
pub fn format_delta(value: i64) -> String {
    let magnitude = format_count(value.unsigned_abs());
    if value < 0 {
        format!("-{}", magnitude)
    } else {
        format!("+{}", magnitude)
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
