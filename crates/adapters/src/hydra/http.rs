// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! reqwest-backed Hydra client.

use super::HydraApi;
use crate::error::ApiError;
use crate::retry::{with_retry, RetryPolicy};
use async_trait::async_trait;
use hy_core::{
    Build, BuildId, Clock, JobsetDefinition, JobsetEvals, JobsetStatus, Project, SystemClock,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

enum Body<'a> {
    Empty,
    Form(&'a [(&'a str, &'a str)]),
    Json(&'a JobsetDefinition),
}

/// HTTP client for a Hydra instance.
///
/// Keeps the login session in its cookie store, so one client should be used
/// for the whole command. Every request goes through the retry policy.
pub struct HttpHydraClient<C: Clock = SystemClock> {
    http: reqwest::Client,
    base: String,
    retry: RetryPolicy,
    clock: C,
}

impl HttpHydraClient<SystemClock> {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_clock(base_url, SystemClock)
    }
}

impl<C: Clock> HttpHydraClient<C> {
    pub fn with_clock(base_url: &str, clock: C) -> Result<Self, ApiError> {
        let base = base_url.trim_end_matches('/').to_string();
        Url::parse(&base)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let referer =
            HeaderValue::from_str(&base).map_err(|e| ApiError::Url(e.to_string()))?;
        headers.insert(REFERER, referer);

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http, base, retry: RetryPolicy::default(), clock })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}{}", self.base, path))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Body<'_>,
    ) -> Result<String, ApiError> {
        let url = self.endpoint(path, query)?;
        let operation = format!("{} {}", method, path);
        with_retry(&self.retry, &self.clock, &operation, || {
            self.attempt(method.clone(), url.clone(), &body)
        })
        .await
    }

    async fn attempt(&self, method: Method, url: Url, body: &Body<'_>) -> Result<String, ApiError> {
        tracing::debug!(%method, %url, "hydra request");
        let path = match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        };
        let builder = self.http.request(method.clone(), url);
        let builder = match body {
            Body::Empty => builder,
            Body::Form(fields) => builder.form(fields),
            Body::Json(definition) => builder.json(definition),
        };

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                method: method.to_string(),
                path,
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let text = self.request(Method::GET, path, query, Body::Empty).await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode { path: path.to_string(), message: e.to_string() })
    }
}

#[async_trait]
impl<C: Clock> HydraApi for HttpHydraClient<C> {
    fn base_url(&self) -> &str {
        &self.base
    }

    async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let fields = [("username", username), ("password", password)];
        self.request(Method::POST, "/login", &[], Body::Form(&fields)).await?;
        tracing::debug!(username, "logged in");
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_json("/", &[]).await
    }

    async fn list_jobsets_status(&self, project: &str) -> Result<Vec<JobsetStatus>, ApiError> {
        let mut jobsets: Vec<JobsetStatus> =
            self.get_json("/api/jobsets", &[("project", project)]).await?;
        for jobset in jobsets.iter_mut().filter(|j| j.project.is_empty()) {
            jobset.project = project.to_string();
        }
        Ok(jobsets)
    }

    async fn get_jobset_evals(
        &self,
        project: &str,
        jobset: &str,
    ) -> Result<JobsetEvals, ApiError> {
        self.get_json(&format!("/jobset/{}/{}/evals", project, jobset), &[]).await
    }

    async fn get_build(&self, id: BuildId) -> Result<Build, ApiError> {
        self.get_json(&format!("/build/{}", id), &[]).await
    }

    async fn get_build_info(&self, id: BuildId) -> Result<Build, ApiError> {
        self.get_json(&format!("/build/{}/api/get-info", id), &[]).await
    }

    async fn cancel_build(&self, id: BuildId) -> Result<(), ApiError> {
        // Side-effecting GET, not part of the JSON API
        self.request(Method::GET, &format!("/build/{}/cancel", id), &[], Body::Empty).await?;
        Ok(())
    }

    async fn put_jobset(
        &self,
        project: &str,
        jobset: &str,
        definition: &JobsetDefinition,
    ) -> Result<(), ApiError> {
        let path = format!("/jobset/{}/{}", project, jobset);
        self.request(Method::PUT, &path, &[], Body::Json(definition)).await?;
        tracing::info!(project, jobset, flake = %definition.flake, "jobset stored");
        Ok(())
    }

    async fn push_jobset(&self, project: &str, jobset: &str) -> Result<(), ApiError> {
        let target = format!("{}:{}", project, jobset);
        let query = [("jobsets", target.as_str()), ("force", "1")];
        self.request(Method::POST, "/api/push", &query, Body::Empty).await?;
        tracing::info!(project, jobset, "evaluation pushed");
        Ok(())
    }

    async fn delete_jobset(&self, project: &str, jobset: &str) -> Result<(), ApiError> {
        let path = format!("/jobset/{}/{}", project, jobset);
        self.request(Method::DELETE, &path, &[], Body::Empty).await?;
        tracing::info!(project, jobset, "jobset deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
