// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitor command handler

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use hy_adapters::HydraApi;
use hy_core::{parse_duration, SystemClock};
use hy_engine::{Monitor, MonitorConfig};

use super::report::ReportArgs;
use super::{exit_with, Terminal};
use crate::exit_error::ExitError;

#[derive(Args, Debug)]
pub struct MonitorArgs {
    /// Project of the jobset
    pub project: String,

    /// Jobset to monitor
    pub jobset: String,

    /// Cancel the jobset and fail after this long, e.g. '6h' [default: no limit]
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Print the jobset tree at this interval even without progress
    #[arg(long, value_parser = parse_duration, default_value = "30s")]
    pub report_interval: Duration,

    /// Time between polls
    #[arg(long, value_parser = parse_duration, default_value = "5s")]
    pub sleep_period: Duration,

    #[command(flatten)]
    pub report: ReportArgs,
}

impl MonitorArgs {
    pub fn config(&self) -> MonitorConfig {
        MonitorConfig {
            timeout: self.timeout,
            report_interval: self.report_interval,
            poll_interval: self.sleep_period,
            ..MonitorConfig::new(self.project.clone(), self.jobset.clone())
        }
    }
}

/// Poll the jobset until it settles; the exit code reflects the outcome.
pub async fn handle(args: MonitorArgs, hydra: &dyn HydraApi) -> Result<()> {
    let sink = args.report.sink().map_err(|e| ExitError::failure(e.to_string()))?;
    let observer = Terminal::new(hydra.links());
    let result =
        Monitor::new(hydra, SystemClock, args.config()).with_report(sink).run(&observer).await?;
    exit_with(result.outcome.exit_code())
}
