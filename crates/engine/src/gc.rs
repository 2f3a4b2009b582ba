// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deletes stale jobsets across projects.

use crate::error::EngineError;
use hy_adapters::HydraApi;
use hy_core::{JobsetRecord, RetentionPlan, RetentionPolicy};

/// What garbage collection did to one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectGc {
    pub project: String,
    pub plan: RetentionPlan,
}

/// Parse a shell-style project pattern such as `ros*`.
pub fn project_pattern(pattern: &str) -> Result<glob::Pattern, EngineError> {
    glob::Pattern::new(pattern)
        .map_err(|e| EngineError::InvalidInput(format!("bad project pattern '{}': {}", pattern, e)))
}

/// Apply `policy` to every project matching `pattern`, deleting stale
/// jobsets oldest first. `now` is unix seconds.
pub async fn collect_garbage<A: HydraApi + ?Sized>(
    hydra: &A,
    pattern: &glob::Pattern,
    policy: &RetentionPolicy,
    now: i64,
) -> Result<Vec<ProjectGc>, EngineError> {
    let mut reports = Vec::new();
    for project in hydra.list_projects().await? {
        if !pattern.matches(&project.name) {
            continue;
        }
        let jobsets = hydra.list_jobsets_status(&project.name).await?;
        let records = jobsets.iter().map(JobsetRecord::from).collect();
        let plan = policy.plan(records, now);

        for jobset in &plan.deleted {
            hydra.delete_jobset(&project.name, &jobset.name).await?;
            tracing::info!(project = %project.name, jobset = %jobset.name, last_checked = ?jobset.last_checked, "deleted stale jobset");
        }
        reports.push(ProjectGc { project: project.name, plan });
    }
    Ok(reports)
}

#[cfg(test)]
#[path = "gc_tests.rs"]
mod tests;
