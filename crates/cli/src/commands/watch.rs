// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CI watcher command handler

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use hy_adapters::{HttpGitLabClient, HydraApi};
use hy_core::{parse_duration, SystemClock};
use hy_engine::{watch_pipeline, WatchConfig};

use super::{exit_with, Terminal};

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Hydra project of the jobset
    pub hydra_project: String,

    /// Jobset to cancel when the CI job is canceled
    pub hydra_jobset: String,

    /// GitLab project the pipeline runs in
    pub gitlab_project: String,

    /// Pipeline id to watch
    pub gitlab_pipeline: String,

    /// Pipeline job to watch for cancellation
    pub gitlab_job: String,

    /// Time between polls
    #[arg(long, value_parser = parse_duration, default_value = "5s")]
    pub sleep_period: Duration,

    /// Give up after this long [default: no limit]
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,
}

impl WatchArgs {
    pub fn config(&self) -> WatchConfig {
        WatchConfig {
            hydra_project: self.hydra_project.clone(),
            hydra_jobset: self.hydra_jobset.clone(),
            gitlab_project: self.gitlab_project.clone(),
            pipeline: self.gitlab_pipeline.clone(),
            job: self.gitlab_job.clone(),
            poll_interval: self.sleep_period,
            timeout: self.timeout.unwrap_or(Duration::MAX),
        }
    }
}

/// Follow a GitLab job and mirror a cancellation onto the Hydra jobset.
pub async fn handle(args: WatchArgs, hydra: &dyn HydraApi, gitlab_api_url: &str) -> Result<()> {
    let gitlab = HttpGitLabClient::new(gitlab_api_url)
        .with_context(|| format!("invalid GITLAB_API_URL '{}'", gitlab_api_url))?;
    let observer = Terminal::new(hydra.links());
    let outcome = watch_pipeline(&gitlab, hydra, &SystemClock, &args.config(), &observer).await;
    exit_with(outcome.exit_code())
}
