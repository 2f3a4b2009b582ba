// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hy: command line utility for Hydra jobsets

mod color;
mod commands;
mod env;
mod exit_error;
mod logging;
mod output;
mod tree;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hy_core::{Clock, Links, SystemClock};

use commands::build::BuildArgs;
use commands::jobset::JobsetArgs;
use commands::maintenance::MaintenanceCommand;
use commands::monitor::MonitorArgs;
use commands::report::ReportCommand;
use commands::watch::WatchArgs;
use commands::{connect, Login};

#[derive(Parser)]
#[command(name = "hy", version, about = "Hydra command line utility", styles = color::styles())]
struct Cli {
    /// Record mutating calls instead of sending them
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect and manage jobsets of a project
    Jobset(JobsetArgs),
    /// Follow a jobset until it succeeds, fails, or times out
    Monitor(MonitorArgs),
    /// Cancel a jobset when the GitLab job that started it is canceled
    #[command(alias = "ci_watcher")]
    CiWatcher(WatchArgs),
    /// Work with JSON report files
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// Housekeeping on the Hydra server
    Maintenance {
        #[command(subcommand)]
        command: MaintenanceCommand,
    },
    /// Inspect a build
    Build(BuildArgs),
}

impl Command {
    fn login(&self) -> Login {
        match self {
            Command::Jobset(args) => args.command.login(),
            Command::Maintenance { command } => command.login(),
            Command::Monitor(_) | Command::CiWatcher(_) => Login::IfAvailable,
            Command::Report { .. } | Command::Build(_) => Login::Never,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = run(cli).await;
    let (code, message) = exit_error::exit_status(&result);
    if let Some(message) = message {
        eprintln!("{}", message);
    }
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<()> {
    let login = cli.command.login();
    match cli.command {
        Command::Report { command } => {
            commands::report::handle(
                command,
                env::hydra_url_opt().map(Links::new),
                &env::flake_prefix(),
            )
        }
        Command::Jobset(args) => {
            let hydra = connect(cli.dry_run, login).await?;
            commands::jobset::handle(&args.project, args.command, &*hydra, &env::flake_prefix())
                .await
        }
        Command::Monitor(args) => {
            let hydra = connect(cli.dry_run, login).await?;
            commands::monitor::handle(args, &*hydra).await
        }
        Command::CiWatcher(args) => {
            let hydra = connect(cli.dry_run, login).await?;
            commands::watch::handle(args, &*hydra, &env::gitlab_api_url()).await
        }
        Command::Maintenance { command } => {
            let hydra = connect(cli.dry_run, login).await?;
            commands::maintenance::handle(command, &*hydra, SystemClock.epoch_secs()).await
        }
        Command::Build(args) => {
            let hydra = connect(cli.dry_run, login).await?;
            commands::build::handle(args, &*hydra).await
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
