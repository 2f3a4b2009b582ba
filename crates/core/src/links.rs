// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Browser links into the control plane's web interface.

use crate::build::BuildId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    base: String,
}

impl Links {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self { base: base.trim_end_matches('/').to_string() }
    }

    /// Recover the base from a jobset URL such as `B/jobset/P/J`.
    pub fn from_jobset_url(url: &str) -> Option<Self> {
        url.rsplit_once("/jobset/").map(|(base, _)| Self::new(base))
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn jobset(&self, project: &str, jobset: &str) -> String {
        format!("{}/jobset/{}/{}", self.base, project, jobset)
    }

    pub fn build(&self, build: BuildId) -> String {
        format!("{}/build/{}", self.base, build)
    }

    pub fn step_log(&self, build: BuildId, step_nr: u32) -> String {
        format!("{}/build/{}/nixlog/{}", self.base, build, step_nr)
    }
}

#[cfg(test)]
#[path = "links_tests.rs"]
mod tests;
