// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dry-run wrapper: reads go through, mutations are only recorded.

use super::{HydraApi, HydraCall};
use crate::error::ApiError;
use async_trait::async_trait;
use hy_core::{Build, BuildId, JobsetDefinition, JobsetEvals, JobsetStatus, Project};
use parking_lot::Mutex;
use std::sync::Arc;

/// Wraps a client so that login and every state-changing call is logged
/// instead of sent. The log is owned by the instance.
#[derive(Clone)]
pub struct DryRunHydraClient<A> {
    inner: A,
    calls: Arc<Mutex<Vec<HydraCall>>>,
}

impl<A: HydraApi> DryRunHydraClient<A> {
    pub fn new(inner: A) -> Self {
        Self { inner, calls: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Calls that were suppressed, in order.
    pub fn calls(&self) -> Vec<HydraCall> {
        self.calls.lock().clone()
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    fn record(&self, call: HydraCall) {
        tracing::info!(?call, "dry-run: not sending");
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl<A: HydraApi> HydraApi for DryRunHydraClient<A> {
    fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    async fn login(&self, username: &str, _password: &str) -> Result<(), ApiError> {
        self.record(HydraCall::Login { username: username.to_string() });
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.inner.list_projects().await
    }

    async fn list_jobsets_status(&self, project: &str) -> Result<Vec<JobsetStatus>, ApiError> {
        self.inner.list_jobsets_status(project).await
    }

    async fn get_jobset_evals(
        &self,
        project: &str,
        jobset: &str,
    ) -> Result<JobsetEvals, ApiError> {
        self.inner.get_jobset_evals(project, jobset).await
    }

    async fn get_build(&self, id: BuildId) -> Result<Build, ApiError> {
        self.inner.get_build(id).await
    }

    async fn get_build_info(&self, id: BuildId) -> Result<Build, ApiError> {
        self.inner.get_build_info(id).await
    }

    async fn cancel_build(&self, id: BuildId) -> Result<(), ApiError> {
        self.record(HydraCall::CancelBuild { id });
        Ok(())
    }

    async fn put_jobset(
        &self,
        project: &str,
        jobset: &str,
        definition: &JobsetDefinition,
    ) -> Result<(), ApiError> {
        self.record(HydraCall::PutJobset {
            project: project.to_string(),
            jobset: jobset.to_string(),
            definition: definition.clone(),
        });
        Ok(())
    }

    async fn push_jobset(&self, project: &str, jobset: &str) -> Result<(), ApiError> {
        self.record(HydraCall::PushJobset { project: project.to_string(), jobset: jobset.to_string() });
        Ok(())
    }

    async fn delete_jobset(&self, project: &str, jobset: &str) -> Result<(), ApiError> {
        self.record(HydraCall::DeleteJobset {
            project: project.to_string(),
            jobset: jobset.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "dry_run_tests.rs"]
mod tests;
