// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Follows a jobset until it succeeds, fails, disappears, or times out.

use crate::error::EngineError;
use crate::jobset_jobs::{collect_jobset_jobs, JobsetJobs};
use crate::report::ReportSink;
use hy_adapters::HydraApi;
use hy_core::{Clock, JobCounters, JobsetStatus, Outcome};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default interval between forced progress reports.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(30);

/// Default sleep between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub project: String,
    pub jobset: String,
    /// `None` polls forever
    pub timeout: Option<Duration>,
    pub report_interval: Duration,
    pub poll_interval: Duration,
}

impl MonitorConfig {
    pub fn new(project: impl Into<String>, jobset: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            jobset: jobset.into(),
            timeout: None,
            report_interval: DEFAULT_REPORT_INTERVAL,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Terminal state of a monitor run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    Succeeded,
    Failed,
    Disappeared,
    TimedOut,
}

impl MonitorOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            MonitorOutcome::Succeeded => 0,
            MonitorOutcome::Disappeared => 2,
            MonitorOutcome::Failed => 3,
            MonitorOutcome::TimedOut => 4,
        }
    }
}

hy_core::simple_display! {
    MonitorOutcome {
        Succeeded => "succeeded",
        Failed => "failed",
        Disappeared => "disappeared",
        TimedOut => "timed out",
    }
}

/// What a finished monitor run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorResult {
    pub outcome: MonitorOutcome,
    /// One-line summary for the terminal
    pub message: String,
    /// Seconds spent polling
    pub duration: f64,
    /// Last snapshot of the jobset, if it was ever seen
    pub job: Option<JobsetStatus>,
}

/// Report body written when a monitor run ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorReport {
    pub jobset_name: String,
    pub jobset_url: String,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub exit_code: i32,
    pub message: String,
    /// `None` when the jobset could not be collected
    pub hydra_jobset_jobs: Option<JobsetJobs>,
    pub job: Option<JobsetStatus>,
}

/// Receives human-facing output while a command polls.
pub trait ProgressObserver: Send + Sync {
    /// Plain status line.
    fn message(&self, line: &str);

    /// Counters changed or the report interval passed.
    fn progress(&self, _status: &JobsetStatus, _jobs: Option<&JobsetJobs>) {}
}

/// Observer that discards everything.
pub struct SilentObserver;

impl ProgressObserver for SilentObserver {
    fn message(&self, _line: &str) {}
}

pub struct Monitor<'a, A: HydraApi + ?Sized, C: Clock> {
    hydra: &'a A,
    clock: C,
    config: MonitorConfig,
    report: Option<ReportSink>,
}

impl<'a, A: HydraApi + ?Sized, C: Clock> Monitor<'a, A, C> {
    pub fn new(hydra: &'a A, clock: C, config: MonitorConfig) -> Self {
        Self { hydra, clock, config, report: None }
    }

    pub fn with_report(mut self, report: Option<ReportSink>) -> Self {
        self.report = report;
        self
    }

    pub async fn run(&self, observer: &dyn ProgressObserver) -> Result<MonitorResult, EngineError> {
        let project = self.config.project.as_str();
        let jobset = self.config.jobset.as_str();
        let jobset_url = self.hydra.links().jobset(project, jobset);
        observer.message(&jobset_url);

        let start = self.clock.now();
        let start_epoch = self.clock.epoch_secs_f64();
        let mut last_counters = JobCounters::default();
        let mut last_report = start;
        let mut job: Option<JobsetStatus> = None;

        let (outcome, message) = loop {
            let now = self.clock.now();
            let elapsed = now.duration_since(start);
            let took = format!(" (took {:.1}s)", elapsed.as_secs_f64());

            if self.config.timeout.is_some_and(|t| elapsed >= t) {
                observer.message(&format!(
                    "Job exceeded allowed runtime, cancelling and timing out with failure for {}",
                    jobset_url
                ));
                match self.hydra.cancel_jobset(project, jobset).await {
                    Ok(cancelled) => {
                        tracing::info!(project, jobset, builds = cancelled.len(), "jobset cancelled")
                    }
                    Err(e) => tracing::warn!(project, jobset, error = %e, "failed to cancel jobset"),
                }
                break (
                    MonitorOutcome::TimedOut,
                    format!(
                        "Job exceeded allowed runtime{}, cancelled and timing out with failure for {}",
                        took, jobset_url
                    ),
                );
            }

            let jobsets = self.hydra.list_jobsets_status(project).await?;
            let Some(current) = jobsets.into_iter().find(|j| j.name == jobset) else {
                break (
                    MonitorOutcome::Disappeared,
                    format!("Job '{}' disappeared{}, reporting failure {}", jobset, took, jobset_url),
                );
            };

            let counters = current.counters();
            if counters != last_counters
                || now.duration_since(last_report) > self.config.report_interval
            {
                tracing::debug!(project, jobset, ?counters, "progress");
                let jobs = self.collect(project, jobset).await;
                observer.progress(&current, jobs.as_ref());
                last_counters = counters;
                last_report = now;
            }

            let status = current.interpret();
            job = Some(current);
            match status.outcome {
                Outcome::Failed => {
                    break (
                        MonitorOutcome::Failed,
                        format!(
                            "Job reports failure {}{}, reporting failure for {}",
                            status.icon, took, jobset_url
                        ),
                    );
                }
                Outcome::Succeeded => {
                    break (
                        MonitorOutcome::Succeeded,
                        format!("Job reports success 🎉{} for {}", took, jobset_url),
                    );
                }
                Outcome::Pending => {}
            }

            self.clock.sleep(self.config.poll_interval).await;
        };

        let duration = self.clock.now().duration_since(start).as_secs_f64();
        tracing::info!(project, jobset, %outcome, duration, "monitor finished");

        if let Some(sink) = &self.report {
            let report = MonitorReport {
                jobset_name: jobset.to_string(),
                jobset_url,
                start: start_epoch,
                end: self.clock.epoch_secs_f64(),
                duration,
                exit_code: outcome.exit_code(),
                message: message.clone(),
                hydra_jobset_jobs: self.collect(project, jobset).await,
                job: job.clone(),
            };
            let body = serde_json::to_value(&report)
                .map_err(|e| EngineError::InvalidInput(format!("unserializable report: {}", e)))?;
            sink.append(body, self.clock.epoch_secs_f64())?;
        }

        observer.message(&message);
        Ok(MonitorResult { outcome, message, duration, job })
    }

    /// Jobset jobs for display and reporting; failures only lose detail.
    async fn collect(&self, project: &str, jobset: &str) -> Option<JobsetJobs> {
        match collect_jobset_jobs(self.hydra, project, jobset).await {
            Ok(jobs) => jobs,
            Err(e) => {
                tracing::warn!(project, jobset, error = %e, "failed to collect jobset jobs");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
