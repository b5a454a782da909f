// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dsr - Flowise document store refresher

mod commands;
mod completions;
mod display;
mod error;
mod output;
mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::refresh::Io;
use commands::{list, refresh};
use completions::{generate_completions, CompletionsArgs};
use dsr_adapters::{HttpStoreClient, TracedStoreClient};
use dsr_core::Settings;
use error::CliError;
use output::OutputFormat;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "dsr",
    version,
    about = "Refresh Flowise document stores and watch them until they settle"
)]
struct Cli {
    /// Log debug diagnostics to stderr (same as DEBUG=true)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every document store
    List(list::ListArgs),
    /// Refresh document stores, interactively or by --id/--name/--all
    Refresh(refresh::RefreshArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<CliError>() {
                Some(cli_error) => eprint!("{}", cli_error),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // Completions need neither configuration nor the network
    if let Commands::Completions(args) = &cli.command {
        generate_completions::<Cli>(args.shell);
        return Ok(ExitCode::SUCCESS);
    }

    let settings = Settings::from_env().map_err(CliError::config)?;
    setup_logging(cli.verbose || settings.debug);
    ctrlc::set_handler(|| {
        eprintln!("\n\nOperation cancelled by user");
        std::process::exit(130);
    })?;
    tracing::debug!(?settings, "configuration loaded");

    let client = TracedStoreClient::new(HttpStoreClient::from_settings(&settings));

    match cli.command {
        Commands::List(args) => {
            list::handle(&client, &settings.base_url, &args, &mut io::stdout().lock()).await?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Refresh(args) => {
            let poll = args.poll_config(settings.poll).map_err(CliError::config)?;

            let mut input = io::stdin().lock();
            let mut stdout = io::stdout();
            // Keep stdout clean for the JSON summary
            let mut chatter: Box<dyn Write> = match args.output {
                OutputFormat::Text => Box::new(io::stdout()),
                OutputFormat::Json => Box::new(io::stderr()),
            };

            let all_succeeded = refresh::handle(
                client,
                &settings.base_url,
                poll,
                &args,
                Io {
                    input: &mut input,
                    interactive: io::stdin().is_terminal(),
                    out: &mut chatter,
                    summary: &mut stdout,
                },
            )
            .await?;

            Ok(if all_succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Completions(_) => Ok(ExitCode::SUCCESS),
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default filter
fn setup_logging(debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if debug {
        "warn,dsr=debug,dsr_core=debug,dsr_adapters=debug,dsr_engine=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}
