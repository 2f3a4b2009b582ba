// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Creating jobsets from release tags or flake URLs.

use crate::error::EngineError;
use hy_adapters::HydraApi;
use hy_core::{JobsetDefinition, JobsetSource};

/// Default flake prefix that release tags resolve under.
pub const DEFAULT_FLAKE_PREFIX: &str = "ros";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobsetRequest {
    pub project: String,
    /// Release tag, or anything containing `http` for a flake URL
    pub input: String,
    /// Derived from the input when absent
    pub name: Option<String>,
    pub description: String,
    pub flake_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedJobset {
    pub name: String,
    pub url: String,
    /// A jobset with the same name existed and was deleted first
    pub replaced: bool,
}

/// Create the jobset described by `request`, replacing any jobset with the
/// same name, and trigger its first evaluation.
pub async fn create_jobset<A: HydraApi + ?Sized>(
    hydra: &A,
    request: &JobsetRequest,
) -> Result<CreatedJobset, EngineError> {
    let source = JobsetSource::parse(&request.input);
    let name = match &request.name {
        Some(name) => name.clone(),
        None => source.default_name().ok_or_else(|| {
            EngineError::InvalidInput(format!("cannot derive a jobset name from '{}'", request.input))
        })?,
    };
    let project = request.project.as_str();

    let existing = hydra.list_jobsets_status(project).await?;
    let replaced = existing.iter().any(|j| j.name == name);
    if replaced {
        hydra.delete_jobset(project, &name).await?;
        tracing::info!(project, jobset = %name, "removed previous jobset");
    }

    let definition =
        JobsetDefinition::flake(source.flake(&request.flake_prefix), request.description.clone());
    hydra.create_or_replace_jobset(project, &name, &definition).await?;

    let url = hydra.links().jobset(project, &name);
    Ok(CreatedJobset { name, url, replaced })
}

#[cfg(test)]
#[path = "jobset_tests.rs"]
mod tests;
