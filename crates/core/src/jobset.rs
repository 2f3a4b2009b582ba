// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jobsets, evaluations, and projects as reported by the control plane.

use crate::build::BuildId;
use serde::{Deserialize, Serialize};

/// Point-in-time status of one jobset, from the project's jobset overview.
///
/// Superseded by the next poll, never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsetStatus {
    pub name: String,
    #[serde(default)]
    pub project: String,
    #[serde(rename = "nrsucceeded", default)]
    pub succeeded: u64,
    #[serde(rename = "nrfailed", default)]
    pub failed: u64,
    #[serde(rename = "nrscheduled", default)]
    pub scheduled: u64,
    #[serde(rename = "nrtotal", default)]
    pub total: u64,
    /// Unix seconds of the last evaluation; `None` until first picked up
    #[serde(rename = "lastcheckedtime", default)]
    pub last_checked: Option<i64>,
    #[serde(rename = "haserrormsg", default, deserialize_with = "crate::serde_flex::bool_or_int")]
    pub has_error: bool,
}

crate::builder! {
    pub struct JobsetStatusBuilder => JobsetStatus {
        into {
            name: String = "jobset",
            project: String = "project",
        }
        set {
            succeeded: u64 = 0,
            failed: u64 = 0,
            scheduled: u64 = 0,
            total: u64 = 0,
            last_checked: Option<i64> = Some(1_700_000_000),
            has_error: bool = false,
        }
    }
}

/// Build counters used to detect progress between polls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobCounters {
    pub succeeded: u64,
    pub failed: u64,
    pub scheduled: u64,
}

impl JobsetStatus {
    pub fn counters(&self) -> JobCounters {
        JobCounters { succeeded: self.succeeded, failed: self.failed, scheduled: self.scheduled }
    }

    pub fn interpret(&self) -> crate::Interpretation {
        crate::status::interpret_job(self)
    }
}

/// One evaluation of a jobset and the builds it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: u64,
    #[serde(default)]
    pub builds: Vec<BuildId>,
}

/// Evaluations listing of a jobset. `evals` is absent before the first
/// evaluation has been scheduled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsetEvals {
    #[serde(default)]
    pub evals: Option<Vec<Evaluation>>,
}

/// Project entry from the control plane's root listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub displayname: Option<String>,
}

/// Body used to create or replace a flake-based jobset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsetDefinition {
    pub description: String,
    pub enabled: u8,
    pub visible: bool,
    pub keepnr: u32,
    pub checkinterval: u32,
    pub schedulingshares: u32,
    /// 1 selects a flake jobset
    #[serde(rename = "type")]
    pub kind: u8,
    pub flake: String,
    pub inputs: serde_json::Map<String, serde_json::Value>,
}

impl JobsetDefinition {
    pub fn flake(flake: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            enabled: 1,
            visible: true,
            keepnr: 3,
            checkinterval: 0,
            schedulingshares: 10,
            kind: 1,
            flake: flake.into(),
            inputs: serde_json::Map::new(),
        }
    }
}

/// What a new jobset should build: a release tag or a flake URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobsetSource {
    Tag(String),
    FlakeUrl(String),
}

impl JobsetSource {
    /// Anything that looks like a URL is a flake reference, everything else a tag.
    pub fn parse(input: &str) -> Self {
        if input.contains("http") {
            JobsetSource::FlakeUrl(input.to_string())
        } else {
            JobsetSource::Tag(input.to_string())
        }
    }

    /// Flake reference for the jobset; tags resolve under `flake_prefix`.
    pub fn flake(&self, flake_prefix: &str) -> String {
        match self {
            JobsetSource::Tag(tag) => format!("{}/{}", flake_prefix, tag),
            JobsetSource::FlakeUrl(url) => url.clone(),
        }
    }

    /// Jobset name used when none is given: `v<tag>`, or the URL path with
    /// slashes turned into dashes.
    pub fn default_name(&self) -> Option<String> {
        match self {
            JobsetSource::Tag(tag) => Some(format!("v{}", tag)),
            JobsetSource::FlakeUrl(raw) => {
                let parsed = url::Url::parse(raw).ok()?;
                let name = parsed.path().replace('/', "-");
                let name = name.trim_matches('-');
                (!name.is_empty()).then(|| name.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "jobset_tests.rs"]
mod tests;
