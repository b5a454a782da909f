// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dsr list`: show every document store

use super::fetch_stores;
use crate::display::{count_by_status, write_listing};
use crate::output::{self, OutputFormat};
use dsr_adapters::StoreClient;
use dsr_core::DocumentStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(Serialize)]
struct StoreListing {
    total: usize,
    by_status: BTreeMap<String, usize>,
    stores: Vec<DocumentStore>,
}

impl fmt::Display for StoreListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_listing(f, &self.stores)
    }
}

pub async fn handle<C: StoreClient, W: Write>(
    client: &C,
    base_url: &str,
    args: &ListArgs,
    out: &mut W,
) -> anyhow::Result<()> {
    let stores = fetch_stores(client, base_url).await?;

    let listing = StoreListing {
        total: stores.len(),
        by_status: count_by_status(&stores),
        stores,
    };
    output::write(out, &listing, args.output)
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
