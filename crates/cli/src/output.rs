// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write a value in the specified format
pub fn write<T, W>(out: &mut W, value: &T, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + std::fmt::Display,
    W: Write,
{
    match format {
        OutputFormat::Text => writeln!(out, "{}", value)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
    }
    Ok(())
}
