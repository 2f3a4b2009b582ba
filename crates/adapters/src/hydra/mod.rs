// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hydra control-plane adapter.

mod dry_run;
mod http;

pub use dry_run::DryRunHydraClient;
pub use http::HttpHydraClient;

use crate::error::ApiError;
use async_trait::async_trait;
use hy_core::{Build, BuildId, JobsetDefinition, JobsetEvals, JobsetStatus, Links, Project};

/// Operations against the Hydra control plane.
#[async_trait]
pub trait HydraApi: Send + Sync {
    /// Base URL used for human-facing links.
    fn base_url(&self) -> &str;

    fn links(&self) -> Links {
        Links::new(self.base_url())
    }

    /// Authenticate; the session cookie is kept by the client.
    async fn login(&self, username: &str, password: &str) -> Result<(), ApiError>;

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    async fn list_jobsets_status(&self, project: &str) -> Result<Vec<JobsetStatus>, ApiError>;

    async fn get_jobset_evals(&self, project: &str, jobset: &str)
        -> Result<JobsetEvals, ApiError>;

    /// Build record without steps.
    async fn get_build(&self, id: BuildId) -> Result<Build, ApiError>;

    /// Build record including its steps.
    async fn get_build_info(&self, id: BuildId) -> Result<Build, ApiError>;

    async fn cancel_build(&self, id: BuildId) -> Result<(), ApiError>;

    async fn put_jobset(
        &self,
        project: &str,
        jobset: &str,
        definition: &JobsetDefinition,
    ) -> Result<(), ApiError>;

    /// Force an evaluation of the jobset.
    async fn push_jobset(&self, project: &str, jobset: &str) -> Result<(), ApiError>;

    async fn delete_jobset(&self, project: &str, jobset: &str) -> Result<(), ApiError>;

    async fn create_or_replace_jobset(
        &self,
        project: &str,
        jobset: &str,
        definition: &JobsetDefinition,
    ) -> Result<(), ApiError> {
        self.put_jobset(project, jobset, definition).await?;
        self.push_jobset(project, jobset).await
    }

    /// Cancel every unfinished build of every evaluation of the jobset.
    ///
    /// Returns the ids of the builds a cancel was issued for.
    async fn cancel_jobset(&self, project: &str, jobset: &str) -> Result<Vec<BuildId>, ApiError> {
        let evals = self.get_jobset_evals(project, jobset).await?;
        let mut cancelled = Vec::new();
        for eval in evals.evals.unwrap_or_default() {
            for id in eval.builds {
                let build = self.get_build(id).await?;
                if !build.finished {
                    self.cancel_build(id).await?;
                    tracing::info!(project, jobset, build_id = %id, "cancelled build");
                    cancelled.push(id);
                }
            }
        }
        Ok(cancelled)
    }
}

/// Recorded control-plane call, used by dry-run and fake clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydraCall {
    Login { username: String },
    ListProjects,
    ListJobsetsStatus { project: String },
    GetJobsetEvals { project: String, jobset: String },
    GetBuild { id: BuildId },
    GetBuildInfo { id: BuildId },
    CancelBuild { id: BuildId },
    PutJobset { project: String, jobset: String, definition: JobsetDefinition },
    PushJobset { project: String, jobset: String },
    DeleteJobset { project: String, jobset: String },
}

impl HydraCall {
    /// Whether the call changes control-plane state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            HydraCall::CancelBuild { .. }
                | HydraCall::PutJobset { .. }
                | HydraCall::PushJobset { .. }
                | HydraCall::DeleteJobset { .. }
        )
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeHydraClient;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
