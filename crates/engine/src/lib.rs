// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hy-engine: monitoring, reporting, and maintenance on top of the Hydra API

pub mod comment;
mod error;
pub mod gc;
pub mod jobset;
pub mod jobset_jobs;
pub mod monitor;
pub mod propagation;
pub mod report;
pub mod watcher;

pub use comment::render_comment;
pub use error::EngineError;
pub use gc::{collect_garbage, project_pattern, ProjectGc};
pub use jobset::{create_jobset, CreatedJobset, JobsetRequest, DEFAULT_FLAKE_PREFIX};
pub use jobset_jobs::{collect_jobset_jobs, JobsetJobs};
pub use monitor::{
    Monitor, MonitorConfig, MonitorOutcome, MonitorReport, MonitorResult, ProgressObserver,
    SilentObserver, DEFAULT_POLL_INTERVAL, DEFAULT_REPORT_INTERVAL,
};
pub use propagation::{matching_steps, resolve_propagation, EnrichedBuild, PropagationLink};
pub use report::{load_report, parse_extras, ReportEntry, ReportError, ReportSink};
pub use watcher::{watch_pipeline, WatchConfig, WatchOutcome};
