// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hy-adapters: Hydra and GitLab API clients

pub mod error;
pub mod gitlab;
pub mod hydra;
pub mod retry;

pub use error::ApiError;
pub use gitlab::{HttpGitLabClient, JobState, PipelineApi, PipelineJob, DEFAULT_GITLAB_API_URL};
pub use hydra::{DryRunHydraClient, HttpHydraClient, HydraApi, HydraCall};
pub use retry::{with_retry, RetryPolicy, DEFAULT_MAX_ATTEMPTS};

#[cfg(any(test, feature = "test-support"))]
pub use gitlab::FakePipelineClient;
#[cfg(any(test, feature = "test-support"))]
pub use hydra::FakeHydraClient;
