// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Build, BuildId, BuildStep, PropagatedFrom};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for raw control-plane codes.
pub mod strategies {
    use proptest::prelude::*;

    /// Any build status code, including unfinished (`None`) and codes outside the table.
    pub fn arb_status_code() -> impl Strategy<Value = Option<i64>> {
        prop_oneof![Just(None), (0i64..16).prop_map(Some), any::<i64>().prop_map(Some)]
    }

    /// Any non-idle busy code.
    pub fn arb_busy_code() -> impl Strategy<Value = i64> {
        prop_oneof![
            Just(1i64),
            Just(10),
            Just(20),
            Just(30),
            Just(40),
            Just(50),
            any::<i64>().prop_filter("busy codes are non-zero", |c| *c != 0),
        ]
    }
}

// ── Factory functions ───────────────────────────────────────────────────

/// Finished step with the given derivation name and status.
pub fn step(build: u64, step_nr: u32, name: &str, status: Option<i64>) -> BuildStep {
    BuildStep::builder()
        .build_id(BuildId(build))
        .step_nr(step_nr)
        .drv_path(format!("/nix/store/{:0>4}{}-{}.drv", build, step_nr, name))
        .status(status)
        .build()
}

/// Step that reused a failure from `origin`.
pub fn propagated_step(build: u64, step_nr: u32, name: &str, origin: u64) -> BuildStep {
    let mut step = step(build, step_nr, name, Some(8));
    step.propagated_from = Some(PropagatedFrom { id: BuildId(origin) });
    step
}

/// Build with the given status and steps.
pub fn build(id: u64, status: Option<i64>, steps: Vec<BuildStep>) -> Build {
    Build::builder()
        .id(BuildId(id))
        .status(status)
        .finished(status.is_some())
        .nixname(format!("package-{}", id))
        .job(format!("job{}", id))
        .steps(steps)
        .build()
}
