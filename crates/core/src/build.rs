// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds and build steps.

use crate::outcome::Interpretation;
use crate::status::{interpret_build, interpret_build_step};
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Control-plane identifier of a build.
    pub struct BuildId;
}

const STORE_PREFIX: &str = "/nix/store/";

/// Reference from a propagated step to the build whose failure it reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagatedFrom {
    pub id: BuildId,
}

/// One unit of work within a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStep {
    #[serde(rename = "stepnr")]
    pub step_nr: u32,
    #[serde(rename = "drvpath")]
    pub drv_path: String,
    /// Build status code; `None` while unfinished
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub busy: i64,
    /// Build this step belongs to
    #[serde(rename = "build")]
    pub build_id: BuildId,
    /// Set when the step reused a cached failure from another build
    #[serde(rename = "propagatedfrom", default)]
    pub propagated_from: Option<PropagatedFrom>,
}

crate::builder! {
    pub struct BuildStepBuilder => BuildStep {
        into {
            drv_path: String = "/nix/store/0000-step.drv",
        }
        set {
            step_nr: u32 = 1,
            status: Option<i64> = Some(0),
            busy: i64 = 0,
            build_id: BuildId = BuildId(1),
            propagated_from: Option<PropagatedFrom> = None,
        }
    }
}

impl BuildStep {
    pub fn interpret(&self) -> Interpretation {
        interpret_build_step(self.status, self.busy)
    }

    /// Normalized derivation name, comparable across builds.
    pub fn name(&self) -> &str {
        derivation_name(&self.drv_path)
    }

    /// Origin build when this step's failure was propagated.
    pub fn origin_build(&self) -> Option<BuildId> {
        self.propagated_from.as_ref().map(|p| p.id)
    }
}

/// Build record; `steps` is only populated by the build-info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: BuildId,
    #[serde(default, deserialize_with = "crate::serde_flex::bool_or_int")]
    pub finished: bool,
    #[serde(rename = "buildstatus", default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub nixname: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub steps: Vec<BuildStep>,
}

crate::builder! {
    pub struct BuildBuilder => Build {
        into {
            nixname: String = "package-1.0",
            job: String = "package",
        }
        set {
            id: BuildId = BuildId(1),
            finished: bool = true,
            status: Option<i64> = Some(0),
            steps: Vec<BuildStep> = Vec::new(),
        }
    }
}

impl Build {
    pub fn interpret(&self) -> Interpretation {
        interpret_build(self.status)
    }
}

/// Name of a derivation without store directory, hash, or `.drv` extension.
///
/// `/nix/store/abc123-hello-2.12.drv` becomes `hello-2.12`. Paths without a
/// hash separator are returned as-is, minus the directory and extension.
pub fn derivation_name(drv_path: &str) -> &str {
    let file = drv_path.rsplit('/').next().unwrap_or(drv_path);
    let name = match file.split_once('-') {
        Some((_, rest)) => rest,
        None => file,
    };
    name.strip_suffix(".drv").unwrap_or(name)
}

/// Derivation path shortened for display: `<hash>-<name>`.
pub fn display_drv_path(drv_path: &str) -> &str {
    let path = drv_path.strip_prefix(STORE_PREFIX).unwrap_or(drv_path);
    path.strip_suffix(".drv").unwrap_or(path)
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
