// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maintenance command handlers

use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;
use hy_adapters::HydraApi;
use hy_core::{format_timestamp, parse_duration, RetentionPolicy};
use hy_engine::{collect_garbage, project_pattern, ProjectGc};

use super::Login;

#[derive(Subcommand, Debug, PartialEq)]
pub enum MaintenanceCommand {
    /// Delete stale jobsets from matching projects
    Gc {
        /// Glob of projects to collect
        #[arg(default_value = "*")]
        pattern: String,

        /// Keep jobsets checked within this window, e.g. '14d'
        #[arg(long, value_parser = parse_duration, default_value = "14d")]
        retain: Duration,

        /// Newest jobsets kept per project regardless of age
        #[arg(long, default_value_t = 1)]
        retain_per_project: usize,
    },
}

impl MaintenanceCommand {
    pub fn login(&self) -> Login {
        match self {
            Self::Gc { .. } => Login::Required,
        }
    }
}

/// Human-readable lines for one project's collection.
pub fn format_gc(report: &ProjectGc, now: i64) -> Vec<String> {
    let mut lines = vec![format!("Checking project {}", report.project)];
    for kept in &report.plan.retained {
        lines.push(format!("  Retaining {}/{}", report.project, kept.name));
    }
    for deleted in &report.plan.deleted {
        lines.push(format!(
            "  Deleting {}/{} from {}",
            report.project,
            deleted.name,
            format_timestamp(deleted.effective_time(now))
        ));
    }
    lines
}

pub async fn handle(command: MaintenanceCommand, hydra: &dyn HydraApi, now: i64) -> Result<()> {
    match command {
        MaintenanceCommand::Gc { pattern, retain, retain_per_project } => {
            let pattern = project_pattern(&pattern)?;
            let policy = RetentionPolicy::new(retain, retain_per_project);
            for report in collect_garbage(hydra, &pattern, &policy, now).await? {
                for line in format_gc(&report, now) {
                    println!("{}", line);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "maintenance_tests.rs"]
mod tests;
