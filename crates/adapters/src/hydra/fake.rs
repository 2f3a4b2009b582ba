// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory Hydra for tests.

use super::{HydraApi, HydraCall};
use crate::error::ApiError;
use async_trait::async_trait;
use hy_core::{
    Build, BuildId, Evaluation, JobsetDefinition, JobsetEvals, JobsetStatus, Project,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

#[derive(Default)]
struct FakeHydraState {
    projects: Vec<Project>,
    /// Scripted jobset listings per project; the last one repeats
    listings: HashMap<String, VecDeque<Vec<JobsetStatus>>>,
    evals: HashMap<(String, String), Vec<Evaluation>>,
    builds: HashMap<BuildId, Build>,
    broken_builds: HashSet<BuildId>,
    next_errors: VecDeque<ApiError>,
    calls: Vec<HydraCall>,
}

/// Fake control plane with scripted responses and an instance-scoped call log.
#[derive(Clone)]
pub struct FakeHydraClient {
    base_url: String,
    inner: Arc<Mutex<FakeHydraState>>,
}

impl Default for FakeHydraClient {
    fn default() -> Self {
        Self {
            base_url: "https://hydra.test".to_string(),
            inner: Arc::new(Mutex::new(FakeHydraState::default())),
        }
    }
}

fn not_found(method: &str, path: String) -> ApiError {
    ApiError::Status { method: method.to_string(), path, status: 404, body: "not found".into() }
}

impl FakeHydraClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_project(&self, name: &str) {
        let mut state = self.inner.lock();
        state.projects.push(Project { name: name.to_string(), displayname: None });
        state.listings.entry(name.to_string()).or_default();
    }

    /// Queue one listing for `project`. Listings are served in order and the
    /// last one keeps being returned.
    pub fn push_listing(&self, project: &str, jobsets: Vec<JobsetStatus>) {
        let mut state = self.inner.lock();
        if !state.projects.iter().any(|p| p.name == project) {
            state.projects.push(Project { name: project.to_string(), displayname: None });
        }
        state.listings.entry(project.to_string()).or_default().push_back(jobsets);
    }

    pub fn set_evals(&self, project: &str, jobset: &str, evals: Vec<Evaluation>) {
        self.inner.lock().evals.insert((project.to_string(), jobset.to_string()), evals);
    }

    pub fn add_build(&self, build: Build) {
        self.inner.lock().builds.insert(build.id, build);
    }

    /// Make build lookups for `id` fail with 404 even if the build was added.
    pub fn break_build(&self, id: BuildId) {
        self.inner.lock().broken_builds.insert(id);
    }

    /// The next call, whatever it is, fails with `error`.
    pub fn fail_next(&self, error: ApiError) {
        self.inner.lock().next_errors.push_back(error);
    }

    pub fn build(&self, id: BuildId) -> Option<Build> {
        self.inner.lock().builds.get(&id).cloned()
    }

    pub fn calls(&self) -> Vec<HydraCall> {
        self.inner.lock().calls.clone()
    }

    pub fn mutations(&self) -> Vec<HydraCall> {
        self.calls().into_iter().filter(HydraCall::is_mutation).collect()
    }

    /// Current listing of `project` without recording a call.
    pub fn jobsets(&self, project: &str) -> Vec<JobsetStatus> {
        self.inner
            .lock()
            .listings
            .get(project)
            .and_then(|l| l.front().cloned())
            .unwrap_or_default()
    }

    fn begin(&self, call: HydraCall) -> Result<(), ApiError> {
        let mut state = self.inner.lock();
        state.calls.push(call);
        match state.next_errors.pop_front() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn lookup_build(&self, id: BuildId, path: String) -> Result<Build, ApiError> {
        let state = self.inner.lock();
        if state.broken_builds.contains(&id) {
            return Err(not_found("GET", path));
        }
        state.builds.get(&id).cloned().ok_or_else(|| not_found("GET", path))
    }

    /// Apply a change to every queued listing of `project`.
    fn edit_listings(&self, project: &str, mut edit: impl FnMut(&mut Vec<JobsetStatus>)) {
        let mut state = self.inner.lock();
        let listings = state.listings.entry(project.to_string()).or_default();
        if listings.is_empty() {
            listings.push_back(Vec::new());
        }
        listings.iter_mut().for_each(|l| edit(l));
    }
}

#[async_trait]
impl HydraApi for FakeHydraClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn login(&self, username: &str, _password: &str) -> Result<(), ApiError> {
        self.begin(HydraCall::Login { username: username.to_string() })
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.begin(HydraCall::ListProjects)?;
        Ok(self.inner.lock().projects.clone())
    }

    async fn list_jobsets_status(&self, project: &str) -> Result<Vec<JobsetStatus>, ApiError> {
        self.begin(HydraCall::ListJobsetsStatus { project: project.to_string() })?;
        let mut state = self.inner.lock();
        let listings = state
            .listings
            .get_mut(project)
            .ok_or_else(|| not_found("GET", format!("/api/jobsets?project={}", project)))?;
        if listings.len() > 1 {
            Ok(listings.pop_front().unwrap_or_default())
        } else {
            Ok(listings.front().cloned().unwrap_or_default())
        }
    }

    async fn get_jobset_evals(
        &self,
        project: &str,
        jobset: &str,
    ) -> Result<JobsetEvals, ApiError> {
        self.begin(HydraCall::GetJobsetEvals {
            project: project.to_string(),
            jobset: jobset.to_string(),
        })?;
        let evals = self.inner.lock().evals.get(&(project.to_string(), jobset.to_string())).cloned();
        Ok(JobsetEvals { evals })
    }

    async fn get_build(&self, id: BuildId) -> Result<Build, ApiError> {
        self.begin(HydraCall::GetBuild { id })?;
        let mut build = self.lookup_build(id, format!("/build/{}", id))?;
        build.steps.clear();
        Ok(build)
    }

    async fn get_build_info(&self, id: BuildId) -> Result<Build, ApiError> {
        self.begin(HydraCall::GetBuildInfo { id })?;
        self.lookup_build(id, format!("/build/{}/api/get-info", id))
    }

    async fn cancel_build(&self, id: BuildId) -> Result<(), ApiError> {
        self.begin(HydraCall::CancelBuild { id })?;
        if let Some(build) = self.inner.lock().builds.get_mut(&id) {
            build.finished = true;
            build.status = Some(4);
        }
        Ok(())
    }

    async fn put_jobset(
        &self,
        project: &str,
        jobset: &str,
        definition: &JobsetDefinition,
    ) -> Result<(), ApiError> {
        self.begin(HydraCall::PutJobset {
            project: project.to_string(),
            jobset: jobset.to_string(),
            definition: definition.clone(),
        })?;
        self.edit_listings(project, |listing| {
            if !listing.iter().any(|j| j.name == jobset) {
                listing.push(JobsetStatus {
                    name: jobset.to_string(),
                    project: project.to_string(),
                    succeeded: 0,
                    failed: 0,
                    scheduled: 0,
                    total: 0,
                    last_checked: None,
                    has_error: false,
                });
            }
        });
        Ok(())
    }

    async fn push_jobset(&self, project: &str, jobset: &str) -> Result<(), ApiError> {
        self.begin(HydraCall::PushJobset { project: project.to_string(), jobset: jobset.to_string() })
    }

    async fn delete_jobset(&self, project: &str, jobset: &str) -> Result<(), ApiError> {
        self.begin(HydraCall::DeleteJobset {
            project: project.to_string(),
            jobset: jobset.to_string(),
        })?;
        let exists = self.jobsets(project).iter().any(|j| j.name == jobset);
        if !exists {
            return Err(not_found("DELETE", format!("/jobset/{}/{}", project, jobset)));
        }
        self.edit_listings(project, |listing| listing.retain(|j| j.name != jobset));
        Ok(())
    }
}
