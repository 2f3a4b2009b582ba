// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hy-core: data model and status interpretation for the hy Hydra tool

pub mod macros;

pub mod build;
pub mod clock;
pub mod jobset;
pub mod links;
pub mod outcome;
pub mod retention;
pub mod serde_flex;
pub mod status;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use build::{derivation_name, display_drv_path, Build, BuildId, BuildStep, PropagatedFrom};
#[cfg(any(test, feature = "test-support"))]
pub use build::{BuildBuilder, BuildStepBuilder};
pub use clock::{Clock, FakeClock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use jobset::JobsetStatusBuilder;
pub use jobset::{
    Evaluation, JobCounters, JobsetDefinition, JobsetEvals, JobsetSource, JobsetStatus, Project,
};
pub use links::Links;
pub use outcome::{Interpretation, Outcome};
pub use retention::{JobsetRecord, RetentionPlan, RetentionPolicy, DEFAULT_RETENTION_WINDOW};
pub use status::{interpret_build, interpret_build_step, interpret_job, BuildStatus, StepBusy};
pub use time_fmt::{format_elapsed, format_timestamp, parse_duration, DurationParseError};
