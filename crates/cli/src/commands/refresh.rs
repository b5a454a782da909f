// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dsr refresh`: refresh stores and watch them until they settle.
//!
//! Without criteria the user picks stores from a numbered menu. With
//! `--id`, `--name` or `--all` the matching stores are refreshed after a
//! confirmation, which is skipped with `--yes` or when stdin is not a
//! terminal. Matches that cannot be refreshed right now are skipped with the
//! reason.

use super::fetch_stores;
use crate::display::{render_progress, write_nothing_refreshable};
use crate::error::CliError;
use crate::output::{self, OutputFormat};
use crate::prompt::{answer_yes_no, choose_stores, Choice};
use dsr_adapters::StoreClient;
use dsr_core::{match_stores, ConfigError, DocumentStore, MatchCriteria, PollConfig, RefreshTarget};
use dsr_engine::{Orchestrator, ProgressSink, RefreshReport};
use std::io::{BufRead, Write};
use std::time::Duration;

/// Events buffered between the refresh tasks and the terminal
const PROGRESS_BUFFER: usize = 256;

#[derive(clap::Args, Debug, Default)]
pub struct RefreshArgs {
    /// Store id or id prefix (repeatable)
    #[arg(long = "id", value_name = "STORE_ID")]
    pub ids: Vec<String>,

    /// Part of a store name, case-insensitive (repeatable)
    #[arg(long = "name", value_name = "NAME")]
    pub names: Vec<String>,

    /// Refresh every refreshable store
    #[arg(long)]
    pub all: bool,

    /// Do not ask for confirmation
    #[arg(long, short)]
    pub yes: bool,

    /// Seconds between status checks (overrides STATUS_CHECK_INTERVAL)
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Seconds before a refresh is reported as timed out (overrides MAX_REFRESH_TIMEOUT)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Summary format
    #[arg(long, short, value_enum, default_value_t)]
    pub output: OutputFormat,
}

impl RefreshArgs {
    fn criteria(&self) -> MatchCriteria {
        MatchCriteria {
            ids: self.ids.clone(),
            names: self.names.clone(),
            all: self.all,
        }
    }

    /// Apply command-line overrides on top of the configured cadence
    pub fn poll_config(&self, base: PollConfig) -> Result<PollConfig, ConfigError> {
        let config = PollConfig {
            status_check_interval: self
                .interval
                .map_or(base.status_check_interval, Duration::from_secs),
            max_refresh_timeout: self
                .timeout
                .map_or(base.max_refresh_timeout, Duration::from_secs),
            ..base
        };
        config.validate()?;
        Ok(config)
    }
}

/// Terminal streams used by the command
pub struct Io<'a, R, W, S> {
    pub input: &'a mut R,
    /// Whether `input` is a terminal someone can answer prompts on
    pub interactive: bool,
    /// Prompts and progress
    pub out: &'a mut W,
    /// Final summary
    pub summary: &'a mut S,
}

/// Run the command. Returns whether every started refresh succeeded;
/// nothing to do counts as success.
pub async fn handle<C, R, W, S>(
    client: C,
    base_url: &str,
    poll: PollConfig,
    args: &RefreshArgs,
    io: Io<'_, R, W, S>,
) -> anyhow::Result<bool>
where
    C: StoreClient,
    R: BufRead,
    W: Write,
    S: Write,
{
    let Io {
        input,
        interactive,
        out,
        summary,
    } = io;

    let stores = fetch_stores(&client, base_url).await?;
    if stores.is_empty() {
        writeln!(out, "No document stores found in your Flowise instance.")?;
        writeln!(out, "   Please create some document stores first.")?;
        return Ok(true);
    }

    let criteria = args.criteria();
    let selected = if criteria.is_empty() {
        match select_interactively(&stores, input, out)? {
            Some(selected) => selected,
            None => return Ok(true),
        }
    } else {
        let ask = interactive && !args.yes;
        match select_by_criteria(&stores, &criteria, ask, input, out)? {
            Some(selected) => selected,
            None => return Ok(true),
        }
    };

    let targets: Vec<RefreshTarget> = selected.iter().map(|s| s.target()).collect();
    writeln!(out)?;
    writeln!(out, "Starting refresh for {} store(s)...", targets.len())?;
    writeln!(out)?;

    let (sink, mut events) = ProgressSink::channel(PROGRESS_BUFFER);
    let orchestrator = Orchestrator::new(client, poll).with_progress(sink);

    // The orchestrator owns the last sink; dropping it ends the event stream
    let run = async move { orchestrator.run_all(targets).await };
    let render = async {
        while let Some(event) = events.recv().await {
            writeln!(out, "{}", render_progress(&event))?;
            writeln!(out)?;
        }
        Ok::<_, std::io::Error>(())
    };
    let (outcomes, rendered) = tokio::join!(run, render);
    rendered?;
    let outcomes = outcomes?;

    let report = RefreshReport::summarize(&outcomes);
    output::write(summary, &report, args.output)?;
    Ok(report.all_succeeded())
}

fn select_interactively<'a, R: BufRead, W: Write>(
    stores: &'a [DocumentStore],
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Option<Vec<&'a DocumentStore>>> {
    let refreshable: Vec<&DocumentStore> = stores
        .iter()
        .filter(|s| s.refreshability().refreshable)
        .collect();
    tracing::info!(count = refreshable.len(), "refreshable stores");

    if refreshable.is_empty() {
        write_nothing_refreshable(out, stores)?;
        return Ok(None);
    }

    match choose_stores(input, out, &refreshable)? {
        Choice::Selected(selected) => Ok(Some(selected)),
        Choice::Quit => {
            writeln!(out, "Exiting...")?;
            Ok(None)
        }
    }
}

fn select_by_criteria<'a, R: BufRead, W: Write>(
    stores: &'a [DocumentStore],
    criteria: &MatchCriteria,
    ask: bool,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Option<Vec<&'a DocumentStore>>> {
    let matched = match_stores(stores, criteria);
    if matched.is_empty() {
        return Err(CliError::no_matches().into());
    }

    let (refreshable, skipped): (Vec<&DocumentStore>, Vec<&DocumentStore>) = matched
        .into_iter()
        .partition(|s| s.refreshability().refreshable);

    if !skipped.is_empty() {
        writeln!(out, "Skipping stores that cannot be refreshed now:")?;
        for store in &skipped {
            writeln!(out, "   - {}: {}", store.label(), store.refreshability().reason)?;
        }
        writeln!(out)?;
    }

    if refreshable.is_empty() {
        writeln!(out, "No matching store can be refreshed right now.")?;
        return Ok(None);
    }

    writeln!(out, "Will refresh {} store(s):", refreshable.len())?;
    for store in &refreshable {
        writeln!(out, "   - {}", store.label())?;
    }

    if ask {
        match answer_yes_no(input, out, "Proceed with refresh?")? {
            Some(true) => {}
            Some(false) => {
                writeln!(out, "Cancelled.")?;
                return Ok(None);
            }
            None => return Err(CliError::unconfirmed().into()),
        }
    }

    Ok(Some(refreshable))
}

#[cfg(test)]
#[path = "refresh_tests.rs"]
mod tests;
