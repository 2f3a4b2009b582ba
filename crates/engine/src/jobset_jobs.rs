// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collects every evaluation of a jobset with its enriched builds.

use crate::propagation::{resolve_propagation, EnrichedBuild};
use futures_util::future::try_join_all;
use hy_adapters::{ApiError, HydraApi};
use hy_core::{BuildId, Evaluation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Evaluations of a jobset plus the build info of each of their builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsetJobs {
    pub evals: Vec<Evaluation>,
    #[serde(rename = "builds_retrieved")]
    pub builds: BTreeMap<BuildId, EnrichedBuild>,
}

impl JobsetJobs {
    /// Builds of `eval` in evaluation order, skipping any not retrieved.
    pub fn builds_of<'a>(&'a self, eval: &'a Evaluation) -> impl Iterator<Item = &'a EnrichedBuild> {
        eval.builds.iter().filter_map(|id| self.builds.get(id))
    }
}

/// Fetch evaluations and build info for a jobset.
///
/// Returns `None` when the jobset has not been evaluated yet. Build infos of
/// an evaluation are fetched concurrently.
pub async fn collect_jobset_jobs<A: HydraApi + ?Sized>(
    hydra: &A,
    project: &str,
    jobset: &str,
) -> Result<Option<JobsetJobs>, ApiError> {
    let Some(evals) = hydra.get_jobset_evals(project, jobset).await?.evals else {
        return Ok(None);
    };

    let mut builds = BTreeMap::new();
    for eval in &evals {
        let pending: Vec<BuildId> =
            eval.builds.iter().copied().filter(|id| !builds.contains_key(id)).collect();
        let fetched = try_join_all(pending.into_iter().map(|id| async move {
            let info = hydra.get_build_info(id).await?;
            Ok::<_, ApiError>((id, resolve_propagation(hydra, info).await))
        }))
        .await?;
        builds.extend(fetched);
    }

    tracing::debug!(project, jobset, evals = evals.len(), builds = builds.len(), "collected jobset jobs");
    Ok(Some(JobsetJobs { evals, builds }))
}

#[cfg(test)]
#[path = "jobset_jobs_tests.rs"]
mod tests;
