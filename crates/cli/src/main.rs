// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! chore: run configured jobs under locks and limits, and report results.

mod commands;
mod exit_error;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chore", version, about = "Periodic-job execution agent")]
struct Cli {
    /// Configuration file.
    #[arg(short = 'c', long = "configuration", global = true, default_value = "chore.yaml")]
    configuration: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Append logs to this file as well as stderr.
    #[arg(long = "log-file", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the named jobs in order, reporting each result.
    Run {
        /// Job names from the configuration's command table.
        #[arg(required = true)]
        jobs: Vec<String>,
    },
    /// Load the configuration and list the resolved job table.
    Check,
}

fn main() {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| std::env::var_os("CHORE_LOG").map(PathBuf::from));
    let _log_guard = logging::init(cli.verbose, log_file.as_deref());

    let result = match &cli.command {
        Commands::Run { jobs } => commands::run::execute(&cli.configuration, jobs),
        Commands::Check => commands::check::execute(&cli.configuration),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(e.code);
    }
}
