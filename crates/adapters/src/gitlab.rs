// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! GitLab pipeline adapter, used to follow an upstream CI job.

use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default GitLab API root.
pub const DEFAULT_GITLAB_API_URL: &str = "https://gitlab.com/api/v4";

/// One job of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineJob {
    pub name: String,
    pub status: String,
}

/// Pipeline job status, reduced to what the watcher acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Success,
    Failed,
    Canceled,
    /// created, pending, running, manual, ...
    Active,
}

impl PipelineJob {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self { name: name.into(), status: status.into() }
    }

    pub fn state(&self) -> JobState {
        match self.status.as_str() {
            "success" => JobState::Success,
            "failed" => JobState::Failed,
            "canceled" => JobState::Canceled,
            _ => JobState::Active,
        }
    }
}

/// Read access to CI pipelines.
#[async_trait]
pub trait PipelineApi: Send + Sync {
    async fn pipeline_jobs(&self, project: &str, pipeline: &str)
        -> Result<Vec<PipelineJob>, ApiError>;
}

/// GitLab REST client.
pub struct HttpGitLabClient {
    http: reqwest::Client,
    api_url: String,
}

impl HttpGitLabClient {
    pub fn new(api_url: &str) -> Result<Self, ApiError> {
        let api_url = api_url.trim_end_matches('/').to_string();
        Url::parse(&api_url)?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self { http, api_url })
    }
}

#[async_trait]
impl PipelineApi for HttpGitLabClient {
    async fn pipeline_jobs(
        &self,
        project: &str,
        pipeline: &str,
    ) -> Result<Vec<PipelineJob>, ApiError> {
        let path = format!("/projects/{}/pipelines/{}/jobs", project, pipeline);
        let mut url = Url::parse(&format!("{}{}", self.api_url, path))?;
        url.query_pairs_mut().append_pair("per_page", "100");
        tracing::debug!(%url, "gitlab request");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                method: "GET".to_string(),
                path,
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode { path, message: e.to_string() })
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{PipelineApi, PipelineJob};
    use crate::error::ApiError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakePipelineState {
        responses: VecDeque<Result<Vec<PipelineJob>, ApiError>>,
        polls: usize,
    }

    /// Fake pipeline API serving scripted responses; the last one repeats.
    #[derive(Clone, Default)]
    pub struct FakePipelineClient {
        inner: Arc<Mutex<FakePipelineState>>,
    }

    impl FakePipelineClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_jobs(&self, jobs: Vec<PipelineJob>) {
            self.inner.lock().responses.push_back(Ok(jobs));
        }

        pub fn push_error(&self, error: ApiError) {
            self.inner.lock().responses.push_back(Err(error));
        }

        /// Number of times the pipeline was fetched.
        pub fn polls(&self) -> usize {
            self.inner.lock().polls
        }
    }

    #[async_trait]
    impl PipelineApi for FakePipelineClient {
        async fn pipeline_jobs(
            &self,
            _project: &str,
            _pipeline: &str,
        ) -> Result<Vec<PipelineJob>, ApiError> {
            let mut state = self.inner.lock();
            state.polls += 1;
            if state.responses.len() > 1 {
                state.responses.pop_front().unwrap_or(Ok(Vec::new()))
            } else {
                state.responses.front().cloned().unwrap_or(Ok(Vec::new()))
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePipelineClient;

#[cfg(test)]
#[path = "gitlab_tests.rs"]
mod tests;
