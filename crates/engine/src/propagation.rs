// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Links propagated failures back to the steps that produced them.
//!
//! A propagated step only names its origin build, not the step inside it.
//! Candidates are found by derivation name among the origin's failed steps.

use hy_adapters::HydraApi;
use hy_core::{Build, BuildId, BuildStep};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Origin of one propagated step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationLink {
    /// Step of the enriched build that reused the failure
    pub step_nr: u32,
    pub origin_build: BuildId,
    /// Failed steps of the origin build with the same derivation name, in origin order
    pub matching_steps: Vec<BuildStep>,
}

/// Build info plus the resolved origins of its propagated steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedBuild {
    #[serde(flatten)]
    pub build: Build,
    #[serde(default)]
    pub propagation: Vec<PropagationLink>,
}

impl EnrichedBuild {
    pub fn plain(build: Build) -> Self {
        Self { build, propagation: Vec::new() }
    }

    pub fn link_for(&self, step_nr: u32) -> Option<&PropagationLink> {
        self.propagation.iter().find(|l| l.step_nr == step_nr)
    }
}

/// Failed steps of `origin` whose derivation name equals `step`'s.
pub fn matching_steps(step: &BuildStep, origin: &Build) -> Vec<BuildStep> {
    let name = step.name();
    origin
        .steps
        .iter()
        .filter(|candidate| candidate.name() == name && candidate.interpret().is_failed())
        .cloned()
        .collect()
}

/// Resolve every propagated step of `build`.
///
/// Each distinct origin build is fetched once. An origin that cannot be
/// fetched leaves its steps unlinked.
pub async fn resolve_propagation<A: HydraApi + ?Sized>(hydra: &A, build: Build) -> EnrichedBuild {
    let mut origins: HashMap<BuildId, Option<Build>> = HashMap::new();
    let mut propagation = Vec::new();

    for step in &build.steps {
        let Some(origin_id) = step.origin_build() else {
            continue;
        };
        if !origins.contains_key(&origin_id) {
            let fetched = match hydra.get_build_info(origin_id).await {
                Ok(origin) => Some(origin),
                Err(e) => {
                    tracing::warn!(
                        build_id = %build.id,
                        origin = %origin_id,
                        error = %e,
                        "skipping propagated step enrichment"
                    );
                    None
                }
            };
            origins.insert(origin_id, fetched);
        }
        if let Some(Some(origin)) = origins.get(&origin_id) {
            propagation.push(PropagationLink {
                step_nr: step.step_nr,
                origin_build: origin_id,
                matching_steps: matching_steps(step, origin),
            });
        }
    }

    EnrichedBuild { build, propagation }
}

#[cfg(test)]
#[path = "propagation_tests.rs"]
mod tests;
