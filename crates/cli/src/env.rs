// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use hy_adapters::{DEFAULT_GITLAB_API_URL, DEFAULT_MAX_ATTEMPTS};
use hy_engine::DEFAULT_FLAKE_PREFIX;

pub const HYDRA_URL: &str = "HYDRA_URL";
pub const HYDRA_USERNAME: &str = "HYDRA_USERNAME";
pub const HYDRA_PASSWORD: &str = "HYDRA_PASSWORD";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("auth vars HYDRA_USERNAME and HYDRA_PASSWORD are not set, cannot login")]
    MissingCredentials,
}

/// Login credentials for mutating commands.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("username", &self.username).finish_non_exhaustive()
    }
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Control-plane base URL (`HYDRA_URL`).
pub fn hydra_url() -> Result<String, ConfigError> {
    var(HYDRA_URL).ok_or(ConfigError::Missing(HYDRA_URL))
}

/// Optional control-plane base URL, used only to build links.
pub fn hydra_url_opt() -> Option<String> {
    var(HYDRA_URL)
}

/// `HYDRA_USERNAME` / `HYDRA_PASSWORD`, both required.
pub fn credentials() -> Result<Credentials, ConfigError> {
    match (var(HYDRA_USERNAME), var(HYDRA_PASSWORD)) {
        (Some(username), Some(password)) => Ok(Credentials { username, password }),
        _ => Err(ConfigError::MissingCredentials),
    }
}

/// GitLab REST API root (`GITLAB_API_URL`).
pub fn gitlab_api_url() -> String {
    var("GITLAB_API_URL").unwrap_or_else(|| DEFAULT_GITLAB_API_URL.to_string())
}

/// Attempts per control-plane call (`HY_RETRIES`), at least one.
pub fn retries() -> u32 {
    var("HY_RETRIES")
        .and_then(|s| s.parse::<u32>().ok())
        .map(|n| n.max(1))
        .unwrap_or(DEFAULT_MAX_ATTEMPTS)
}

/// Flake reference prefix for tag inputs (`HY_FLAKE_PREFIX`).
pub fn flake_prefix() -> String {
    var("HY_FLAKE_PREFIX").unwrap_or_else(|| DEFAULT_FLAKE_PREFIX.to_string())
}

/// Log filter directive: `HY_LOG` > `RUST_LOG`.
pub fn log_filter() -> Option<String> {
    var("HY_LOG").or_else(|| var("RUST_LOG"))
}
