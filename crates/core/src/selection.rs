// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Choosing which stores to refresh.
//!
//! Two front ends narrow the store list to refresh targets: an interactive
//! selection string over a numbered menu (`1,3-5` or `all`) and
//! non-interactive match criteria (`--id`, `--name`, `--all`). Both are pure.

use crate::store::DocumentStore;
use std::fmt;

/// Why a fragment of a selection string was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// `a-b` with bounds outside the menu or reversed
    InvalidRange,
    /// `a-b` where either side is not a number
    InvalidRangeFormat,
    /// A single number outside the menu
    OutOfBounds,
    /// Not a number at all
    InvalidInput,
}

/// A fragment of the selection string that could not be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub fragment: String,
    pub reason: RejectReason,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.reason {
            RejectReason::InvalidRange => "Invalid range",
            RejectReason::InvalidRangeFormat => "Invalid range format",
            RejectReason::OutOfBounds => "Invalid selection",
            RejectReason::InvalidInput => "Invalid input",
        };
        write!(f, "{}: {}", label, self.fragment)
    }
}

/// Parsed selection: sorted, de-duplicated 1-based menu indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub indices: Vec<usize>,
    pub rejected: Vec<Rejected>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Resolve indices against the menu they were chosen from
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Vec<&'a T> {
        self.indices
            .iter()
            .filter_map(|i| i.checked_sub(1).and_then(|i| items.get(i)))
            .collect()
    }
}

/// Parse a selection string such as `1`, `1,3,5`, `2-4` or `all` against a
/// menu of `max` entries. Unusable fragments are reported, not fatal.
pub fn parse_selection(input: &str, max: usize) -> Selection {
    let input = input.trim().to_lowercase();

    if input == "all" {
        return Selection {
            indices: (1..=max).collect(),
            rejected: Vec::new(),
        };
    }

    let mut indices = Vec::new();
    let mut rejected = Vec::new();
    let mut reject = |fragment: &str, reason| {
        rejected.push(Rejected {
            fragment: fragment.to_string(),
            reason,
        })
    };

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some((start, end)) = part.split_once('-') {
            match (start.trim().parse::<usize>(), end.trim().parse::<usize>()) {
                (Ok(start), Ok(end)) => {
                    if start < 1 || end > max || start > end {
                        reject(part, RejectReason::InvalidRange);
                    } else {
                        indices.extend(start..=end);
                    }
                }
                _ => reject(part, RejectReason::InvalidRangeFormat),
            }
        } else {
            match part.parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => indices.push(n),
                Ok(_) => reject(part, RejectReason::OutOfBounds),
                Err(_) => reject(part, RejectReason::InvalidInput),
            }
        }
    }

    indices.sort_unstable();
    indices.dedup();
    Selection { indices, rejected }
}

/// Non-interactive store criteria
#[derive(Debug, Clone, Default)]
pub struct MatchCriteria {
    /// Full ids or id prefixes
    pub ids: Vec<String>,
    /// Case-insensitive name substrings
    pub names: Vec<String>,
    /// Match every store
    pub all: bool,
}

impl MatchCriteria {
    pub fn is_empty(&self) -> bool {
        !self.all && self.ids.iter().all(|s| s.is_empty()) && self.names.iter().all(|s| s.is_empty())
    }
}

/// Stores matching any criterion, without duplicates. Id matches come first,
/// in criteria order, followed by name matches.
pub fn match_stores<'a>(stores: &'a [DocumentStore], criteria: &MatchCriteria) -> Vec<&'a DocumentStore> {
    if criteria.all {
        return stores.iter().collect();
    }

    let mut matched: Vec<&DocumentStore> = Vec::new();
    let mut push = |store: &'a DocumentStore| {
        if !matched.iter().any(|m| m.id == store.id) {
            matched.push(store);
        }
    };

    for id in criteria.ids.iter().filter(|s| !s.is_empty()) {
        stores
            .iter()
            .filter(|s| s.id.starts_with(id.as_str()))
            .for_each(&mut push);
    }

    for name in criteria.names.iter().filter(|s| !s.is_empty()) {
        let needle = name.to_lowercase();
        stores
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .for_each(&mut push);
    }

    matched
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
