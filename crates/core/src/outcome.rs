// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical tri-state outcome shared by jobsets, builds, and steps.

use serde::{Deserialize, Serialize};

/// Outcome of a jobset, build, or build step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Everything finished successfully
    Succeeded,
    /// Finished with a failure
    Failed,
    /// Not yet conclusive
    Pending,
}

impl Outcome {
    /// Whether no further change is expected for the entity.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Pending)
    }
}

crate::simple_display! {
    Outcome {
        Succeeded => "succeeded",
        Failed => "failed",
        Pending => "pending",
    }
}

/// Result of interpreting a raw status: the outcome plus what to show a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpretation {
    pub outcome: Outcome,
    pub icon: &'static str,
    pub label: &'static str,
}

impl Interpretation {
    pub(crate) const fn new(outcome: Outcome, icon: &'static str, label: &'static str) -> Self {
        Self { outcome, icon, label }
    }

    pub fn is_failed(&self) -> bool {
        self.outcome == Outcome::Failed
    }

    pub fn is_succeeded(&self) -> bool {
        self.outcome == Outcome::Succeeded
    }

    pub fn is_pending(&self) -> bool {
        self.outcome == Outcome::Pending
    }
}
