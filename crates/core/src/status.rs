// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status interpretation for jobsets, builds, and build steps.
//!
//! The control plane overloads small integer codes for build and step state.
//! Everything here is total: unknown codes map to a fallback entry instead of
//! an error, since new codes may appear in any poll.

use crate::jobset::JobsetStatus;
use crate::outcome::{Interpretation, Outcome};

/// Build (and finished step) status as reported by the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStatus {
    /// `null`: not finished yet
    Unfinished,
    Succeeded,
    Failed,
    DependencyFailed,
    /// Codes 3 and 9
    Aborted(i64),
    Canceled,
    FailedWithOutput,
    TimedOut,
    CachedFailure,
    LogLimitExceeded,
    OutputLimitExceeded,
    /// Any code outside the known table
    Unknown(i64),
}

impl BuildStatus {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            None => BuildStatus::Unfinished,
            Some(0) => BuildStatus::Succeeded,
            Some(1) => BuildStatus::Failed,
            Some(2) => BuildStatus::DependencyFailed,
            Some(c @ (3 | 9)) => BuildStatus::Aborted(c),
            Some(4) => BuildStatus::Canceled,
            Some(6) => BuildStatus::FailedWithOutput,
            Some(7) => BuildStatus::TimedOut,
            Some(8) => BuildStatus::CachedFailure,
            Some(10) => BuildStatus::LogLimitExceeded,
            Some(11) => BuildStatus::OutputLimitExceeded,
            Some(c) => BuildStatus::Unknown(c),
        }
    }

    pub fn interpret(self) -> Interpretation {
        use Outcome::{Failed, Pending, Succeeded};
        match self {
            BuildStatus::Unfinished => Interpretation::new(Pending, "🏗️", "pending"),
            BuildStatus::Succeeded => Interpretation::new(Succeeded, "✅", "succeeded"),
            BuildStatus::Failed => Interpretation::new(Failed, "❌", "failed"),
            BuildStatus::DependencyFailed => {
                Interpretation::new(Failed, "💥", "dependency failed")
            }
            BuildStatus::Aborted(_) => Interpretation::new(Failed, "💀", "aborted"),
            BuildStatus::Canceled => Interpretation::new(Failed, "🛑", "canceled by the user"),
            BuildStatus::FailedWithOutput => {
                Interpretation::new(Failed, "🟥", "failed with output")
            }
            BuildStatus::TimedOut => Interpretation::new(Failed, "⌛", "timed out"),
            // Steps that reused a cached failure report this
            BuildStatus::CachedFailure => Interpretation::new(Failed, "🥀", "cached failure"),
            BuildStatus::LogLimitExceeded => {
                Interpretation::new(Failed, "🔥", "log size limit exceeded")
            }
            BuildStatus::OutputLimitExceeded => {
                Interpretation::new(Failed, "🔥", "output size limit exceeded")
            }
            BuildStatus::Unknown(_) => Interpretation::new(Failed, "🔥", "unspecified failure"),
        }
    }
}

/// Activity of an in-progress build step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepBusy {
    Idle,
    Preparing,
    Connecting,
    SendingInputs,
    Building,
    ReceivingOutputs,
    PostProcessing,
    Unknown(i64),
}

impl StepBusy {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => StepBusy::Idle,
            1 => StepBusy::Preparing,
            10 => StepBusy::Connecting,
            20 => StepBusy::SendingInputs,
            30 => StepBusy::Building,
            40 => StepBusy::ReceivingOutputs,
            50 => StepBusy::PostProcessing,
            c => StepBusy::Unknown(c),
        }
    }

    /// Interpretation of a busy step; `None` when the step is idle.
    pub fn interpret(self) -> Option<Interpretation> {
        let pending = |icon, label| Some(Interpretation::new(Outcome::Pending, icon, label));
        match self {
            StepBusy::Idle => None,
            StepBusy::Preparing => pending("♨️", "preparing"),
            StepBusy::Connecting => pending("🔗", "connecting"),
            StepBusy::SendingInputs => pending("📤", "sending inputs"),
            StepBusy::Building => pending("🏗️", "building"),
            StepBusy::ReceivingOutputs => pending("📩", "receiving outputs"),
            StepBusy::PostProcessing => pending("🖌️", "post-processing"),
            StepBusy::Unknown(_) => pending("🔥", "unknown build step busy flag"),
        }
    }
}

/// Interpret a jobset's counters.
pub fn interpret_job(job: &JobsetStatus) -> Interpretation {
    use Outcome::{Failed, Pending, Succeeded};
    if job.last_checked.is_none() {
        // Not picked up by the evaluator yet
        return Interpretation::new(Pending, "⏳", "awaiting");
    }
    if job.has_error {
        return Interpretation::new(Failed, "🟥", "error");
    }
    if job.total == 0 {
        return Interpretation::new(Pending, "🏗️", "processing");
    }
    if job.succeeded == job.total {
        return Interpretation::new(Succeeded, "✅", "succeeded");
    }
    if job.succeeded.saturating_add(job.failed) == job.total {
        // Evaluation was fine but some builds failed
        return Interpretation::new(Failed, "🟧", "partial failure");
    }
    Interpretation::new(Pending, "🏗️", "processing")
}

/// Interpret a build status code; `None` means the build has not finished.
pub fn interpret_build(status: Option<i64>) -> Interpretation {
    BuildStatus::from_code(status).interpret()
}

/// Interpret a build step. A busy step is pending whatever its status says.
pub fn interpret_build_step(status: Option<i64>, busy: i64) -> Interpretation {
    match StepBusy::from_code(busy).interpret() {
        Some(busy) => busy,
        None => interpret_build(status),
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
