// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable rendering of stores and refresh progress

use dsr_core::format::{format_count, format_delta, format_elapsed};
use dsr_core::{DocumentStore, RefreshResult, StatusClass, StoreStatus};
use dsr_engine::ProgressEvent;
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::io;

pub const RULE_WIDTH: usize = 80;
const SOURCE_MAX_CHARS: usize = 50;

pub fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

/// Store counts keyed by status, `UNKNOWN` for stores without one
pub fn count_by_status(stores: &[DocumentStore]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for store in stores {
        let status = if store.status.is_empty() {
            "UNKNOWN".to_string()
        } else {
            store.status.clone()
        };
        *counts.entry(status).or_insert(0) += 1;
    }
    counts
}

/// Full listing: summary by status, then every store in detail
pub fn write_listing(f: &mut impl Write, stores: &[DocumentStore]) -> fmt::Result {
    writeln!(f, "{}", rule('='))?;
    writeln!(f, "Document Stores ({} total)", stores.len())?;
    writeln!(f, "{}", rule('='))?;

    if stores.is_empty() {
        return writeln!(f, "   No document stores found.");
    }

    writeln!(f)?;
    writeln!(f, "Summary by Status:")?;
    for (status, count) in count_by_status(stores) {
        writeln!(f, "   - {}: {} store(s)", status, count)?;
    }

    writeln!(f)?;
    write!(f, "{}", rule('-'))?;
    for (idx, store) in stores.iter().enumerate() {
        writeln!(f)?;
        write_store_details(f, store, idx + 1)?;
    }

    writeln!(f)?;
    write!(f, "{}", rule('='))
}

fn write_store_details(f: &mut impl Write, store: &DocumentStore, index: usize) -> fmt::Result {
    writeln!(f, "  {}. {}", index, store.display_name())?;
    writeln!(f, "     ID: {}", store.id)?;
    writeln!(f, "     Status: {}", status_or_unknown(store))?;
    if !store.description.is_empty() {
        writeln!(f, "     Description: {}", store.description)?;
    }
    writeln!(f, "     Chunks: {}", format_count(store.total_chunks))?;
    writeln!(f, "     Characters: {}", format_count(store.total_chars))?;

    if store.loaders.is_empty() {
        writeln!(f, "     Loaders: None configured")?;
    } else {
        writeln!(f, "     Loaders ({}):", store.loaders.len())?;
        for (idx, loader) in store.loaders.iter().enumerate() {
            writeln!(f, "       {}. {}", idx + 1, or_unknown(&loader.loader_name))?;
            writeln!(f, "          ID: {}", or_unknown(&loader.id))?;
            writeln!(f, "          Status: {}", or_unknown(&loader.status))?;

            let config = &loader.config;
            let fields = [
                ("Source", config.source.clone()),
                ("Source Type", config.source_type.clone()),
                ("File Type", config.file_type.clone()),
                ("URL", config.url.clone()),
                ("Directory", config.directory_path.clone()),
                ("Recursive", config.recursive.map(|r| r.to_string())),
            ];
            for (label, value) in fields {
                if let Some(value) = value {
                    writeln!(f, "          {}: {}", label, value)?;
                }
            }
            if let Some(splitter) = &config.text_splitter {
                if let Some(size) = splitter.chunk_size.filter(|s| *s > 0) {
                    writeln!(f, "          Chunk Size: {}", size)?;
                }
                if let Some(overlap) = splitter.chunk_overlap.filter(|o| *o > 0) {
                    writeln!(f, "          Chunk Overlap: {}", overlap)?;
                }
            }
        }
    }

    if let Some(vector_store) = &store.vector_store_config {
        writeln!(f, "     Vector Store: {}", or_unknown(&vector_store.name))?;
        writeln!(f, "     Vector Store ID: {}", or_unknown(&vector_store.id))?;
        if let Some(embedding) = &store.embedding_config {
            writeln!(f, "     Embedding Model: {}", or_unknown(&embedding.name))?;
        }
    }

    if let Some(created) = &store.created_date {
        writeln!(f, "     Created: {}", created)?;
    }
    if let Some(updated) = &store.updated_date {
        writeln!(f, "     Updated: {}", updated)?;
    }
    Ok(())
}

/// Numbered menu of refreshable stores for interactive selection
pub fn menu(stores: &[&DocumentStore]) -> String {
    let mut lines = vec![rule('='), "Refreshable Document Stores".to_string(), rule('=')];

    for (idx, store) in stores.iter().enumerate() {
        lines.push(format!("  {}. {}", idx + 1, store.display_name()));
        lines.push(format!("       ID: {}", store.id));
        lines.push(format!("       Status: {}", status_or_unknown(store)));
        lines.push(format!("       Chunks: {}", format_count(store.total_chunks)));

        if !store.loaders.is_empty() {
            lines.push(format!("       Loaders: {}", store.loaders.len()));
            for (i, loader) in store.loaders.iter().enumerate() {
                lines.push(format!("         {}. {}", i + 1, or_unknown(&loader.loader_name)));
                if let Some(source_type) = &loader.config.source_type {
                    lines.push(format!("            Type: {}", source_type));
                }
                if let Some(source) = &loader.config.source {
                    lines.push(format!("            Source: {}", truncate(source, SOURCE_MAX_CHARS)));
                }
            }
        }
        lines.push(String::new());
    }

    lines.push(rule('='));
    lines.join("\n")
}

/// Explain why nothing can be refreshed, with every store's status
pub fn write_nothing_refreshable<W: io::Write>(out: &mut W, stores: &[DocumentStore]) -> io::Result<()> {
    writeln!(out, "No refreshable document stores found.")?;
    writeln!(out, "   Only stores with SYNC, UPSERTED or EMPTY status can be refreshed.")?;
    writeln!(out)?;
    writeln!(out, "   Current store statuses:")?;
    for store in stores {
        writeln!(out, "   - {}: {}", store.label(), store.refreshability().reason)?;
    }
    Ok(())
}

/// Progress line(s) for one event, in the order events arrive
pub fn render_progress(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::Triggered { store_name, .. } => format!("Started refresh for: {}", store_name),
        ProgressEvent::Polled {
            store_name,
            status,
            check,
            elapsed,
            chunks,
            delta,
            ..
        } => {
            let status_display = if status.is_empty() { "UNKNOWN" } else { status };
            let note = match StoreStatus::parse(status).class() {
                StatusClass::Refreshable => " (Ready)",
                StatusClass::Busy => "",
                StatusClass::Waiting => " (Awaiting update)",
                StatusClass::Unsupported => " (Unexpected status)",
            };
            let since_last = match *delta {
                0 => String::new(),
                delta => format!(" ({} since last check)", format_delta(delta)),
            };
            format!(
                "{}: {}{} [Check #{}]\n   Chunks: {}{}\n   Elapsed: {}",
                store_name,
                status_display,
                note,
                check,
                format_count(*chunks),
                since_last,
                format_elapsed(*elapsed)
            )
        }
        ProgressEvent::PollFailed {
            store_name,
            error,
            consecutive,
            ..
        } => format!(
            "{}: Failed to fetch status ({}), attempt {} - retrying...",
            store_name, error, consecutive
        ),
        ProgressEvent::Finished(outcome) => {
            let elapsed = format_elapsed(outcome.duration);
            match &outcome.result {
                RefreshResult::Success => format!(
                    "{}: Completed in {}\n   Final status: {}\n   Final chunks: {} (Initial: {})",
                    outcome.store_name,
                    elapsed,
                    outcome.final_status.as_deref().unwrap_or("UNKNOWN"),
                    format_count(outcome.final_chunks.unwrap_or(outcome.initial_chunks)),
                    format_count(outcome.initial_chunks)
                ),
                RefreshResult::Failed { reason } => {
                    format!("{}: Failed - {}", outcome.store_name, reason)
                }
                RefreshResult::TimedOut => format!(
                    "{}: Timeout after {}\n   Status checks: {}",
                    outcome.store_name, elapsed, outcome.status_checks
                ),
            }
        }
    }
}

fn status_or_unknown(store: &DocumentStore) -> &str {
    or_unknown(&store.status)
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() {
        "UNKNOWN"
    } else {
        value
    }
}

/// Cut to `max` characters, marking the cut with `...`
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
