// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retention policy for historical jobsets.
//!
//! The newest `keep_per_project` jobsets always survive. Of the rest, those
//! older than the retention window are deleted. Nothing is persisted between
//! runs; the plan is recomputed from the current jobset list.

use crate::jobset::JobsetStatus;
use serde::Serialize;
use std::time::Duration;

/// Default retention window: 14 days.
pub const DEFAULT_RETENTION_WINDOW: Duration = Duration::from_secs(14 * 24 * 60 * 60);

/// A jobset as seen by the retention policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobsetRecord {
    pub name: String,
    pub project: String,
    /// Unix seconds; `None` while the jobset waits for its first evaluation
    pub last_checked: Option<i64>,
}

impl JobsetRecord {
    pub fn new(project: impl Into<String>, name: impl Into<String>, last_checked: Option<i64>) -> Self {
        Self { name: name.into(), project: project.into(), last_checked }
    }

    /// Timestamp used for ordering; unknown means "now", i.e. freshest.
    pub fn effective_time(&self, now: i64) -> i64 {
        self.last_checked.unwrap_or(now)
    }
}

impl From<&JobsetStatus> for JobsetRecord {
    fn from(status: &JobsetStatus) -> Self {
        Self {
            name: status.name.clone(),
            project: status.project.clone(),
            last_checked: status.last_checked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Maximum age before a jobset outside the floor becomes eligible for deletion
    pub window: Duration,
    /// Number of most recent jobsets kept regardless of age
    pub keep_per_project: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self { window: DEFAULT_RETENTION_WINDOW, keep_per_project: 1 }
    }
}

/// Outcome of applying a [`RetentionPolicy`] to one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RetentionPlan {
    /// Most recent first
    pub retained: Vec<JobsetRecord>,
    /// Oldest first, the order deletions are carried out in
    pub deleted: Vec<JobsetRecord>,
}

impl RetentionPolicy {
    pub fn new(window: Duration, keep_per_project: usize) -> Self {
        Self { window, keep_per_project }
    }

    /// Split `jobsets` into retained and deleted entries as of `now` (unix seconds).
    pub fn plan(&self, mut jobsets: Vec<JobsetRecord>, now: i64) -> RetentionPlan {
        // Stable sort keeps listing order among equal timestamps
        jobsets.sort_by_key(|j| std::cmp::Reverse(j.effective_time(now)));

        let split = self.keep_per_project.min(jobsets.len());
        let remainder = jobsets.split_off(split);
        let mut plan = RetentionPlan { retained: jobsets, deleted: Vec::new() };

        let window = i64::try_from(self.window.as_secs()).unwrap_or(i64::MAX);
        for jobset in remainder {
            let age = now.saturating_sub(jobset.effective_time(now));
            if age > window {
                plan.deleted.push(jobset);
            } else {
                plan.retained.push(jobset);
            }
        }
        plan.deleted.reverse();
        plan
    }
}

#[cfg(test)]
#[path = "retention_tests.rs"]
mod tests;
