// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Follows an upstream CI job and mirrors its cancellation onto a jobset.

use crate::monitor::ProgressObserver;
use hy_adapters::{HydraApi, JobState, PipelineApi};
use hy_core::{format_timestamp, Clock};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub hydra_project: String,
    pub hydra_jobset: String,
    pub gitlab_project: String,
    pub pipeline: String,
    pub job: String,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

/// Terminal state of a pipeline watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    Succeeded,
    Failed,
    /// Upstream job was canceled and the jobset cancel was attempted
    Canceled,
    JobMissing,
    FetchFailed,
    TimedOut,
}

impl WatchOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            WatchOutcome::Succeeded | WatchOutcome::Canceled => 0,
            WatchOutcome::Failed => 1,
            WatchOutcome::JobMissing => 2,
            WatchOutcome::FetchFailed => 3,
            WatchOutcome::TimedOut => 4,
        }
    }
}

/// Poll the pipeline until the watched job settles.
pub async fn watch_pipeline<P, A, C>(
    pipelines: &P,
    hydra: &A,
    clock: &C,
    config: &WatchConfig,
    observer: &dyn ProgressObserver,
) -> WatchOutcome
where
    P: PipelineApi + ?Sized,
    A: HydraApi + ?Sized,
    C: Clock,
{
    let start = clock.now();
    while clock.now().duration_since(start) < config.timeout {
        let jobs = match pipelines.pipeline_jobs(&config.gitlab_project, &config.pipeline).await {
            Ok(jobs) => jobs,
            Err(e) => {
                observer.message(&format!("Pipeline url retrieval failed {}, exiting with 3", e));
                return WatchOutcome::FetchFailed;
            }
        };
        let Some(job) = jobs.into_iter().find(|j| j.name == config.job) else {
            observer.message(&format!(
                "Couldn't find job '{}' in pipeline {}, exiting with 2.",
                config.job, config.pipeline
            ));
            return WatchOutcome::JobMissing;
        };

        observer.message(&format!(
            "Status: {} at {}",
            job.status,
            format_timestamp(clock.epoch_secs())
        ));
        match job.state() {
            JobState::Success => {
                observer.message("Status success, exiting with 0.");
                return WatchOutcome::Succeeded;
            }
            JobState::Failed => {
                observer.message("Status failed, reporting failure as well, exiting with 1.");
                return WatchOutcome::Failed;
            }
            JobState::Canceled => {
                observer.message(&format!(
                    "Cancelling hydra jobset {} for {}.",
                    config.hydra_jobset, config.hydra_project
                ));
                // The jobset may not exist yet
                if let Err(e) = hydra.cancel_jobset(&config.hydra_project, &config.hydra_jobset).await {
                    tracing::warn!(
                        project = %config.hydra_project,
                        jobset = %config.hydra_jobset,
                        error = %e,
                        "failed to cancel jobset"
                    );
                }
                return WatchOutcome::Canceled;
            }
            JobState::Active => {}
        }
        clock.sleep(config.poll_interval).await;
    }
    observer.message("Timing out, exiting with 4.");
    WatchOutcome::TimedOut
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
