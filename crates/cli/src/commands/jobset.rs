// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jobset command handlers

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use hy_adapters::HydraApi;
use hy_core::{Clock, SystemClock};
use hy_engine::{collect_jobset_jobs, create_jobset, JobsetRequest};

use super::Login;
use crate::color;
use crate::output::{format_jobset_jobs, format_jobset_list};

#[derive(Args)]
pub struct JobsetArgs {
    /// Project to perform jobset operations on
    pub project: String,

    #[command(subcommand)]
    pub command: JobsetCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum JobsetCommand {
    /// List jobsets with their build counters
    List,
    /// Create a jobset, replacing any jobset with the same name
    Create {
        /// A release tag such as '2.26.0-20220331114913-0', or a flake tarball URL
        input: String,
        /// Jobset name [default: 'v<tag>' or the hyphenated URL path]
        #[arg(long)]
        name: Option<String>,
        /// Jobset description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a jobset
    Delete {
        /// Jobset to delete
        jobset: String,
    },
    /// Show evaluations, builds and failing steps of a jobset
    Jobs {
        /// Jobset to list the jobs for
        jobset: String,
    },
    /// Cancel every unfinished build of a jobset
    Cancel {
        /// Jobset to cancel
        jobset: String,
    },
}

impl JobsetCommand {
    pub fn login(&self) -> Login {
        match self {
            Self::List | Self::Jobs { .. } => Login::Never,
            Self::Create { .. } | Self::Delete { .. } | Self::Cancel { .. } => Login::Required,
        }
    }
}

pub async fn handle(
    project: &str,
    command: JobsetCommand,
    hydra: &dyn HydraApi,
    flake_prefix: &str,
) -> Result<()> {
    match command {
        JobsetCommand::List => {
            let jobs = hydra
                .list_jobsets_status(project)
                .await
                .with_context(|| format!("listing jobsets of {}", project))?;
            println!("{}", format_jobset_list(project, jobs, color::should_colorize()));
        }
        JobsetCommand::Create { input, name, description } => {
            let request = JobsetRequest {
                project: project.to_string(),
                input,
                name,
                description,
                flake_prefix: flake_prefix.to_string(),
            };
            let created = create_jobset(hydra, &request).await?;
            if created.replaced {
                println!("Removed previous jobset {}/{}", project, created.name);
            }
            println!("Created jobset {}", created.url);
        }
        JobsetCommand::Delete { jobset } => {
            hydra
                .delete_jobset(project, &jobset)
                .await
                .with_context(|| format!("deleting {}/{}", project, jobset))?;
            println!("Deleted {}/{}", project, jobset);
        }
        JobsetCommand::Jobs { jobset } => {
            let jobs = collect_jobset_jobs(hydra, project, &jobset)
                .await
                .with_context(|| format!("collecting jobs of {}/{}", project, jobset))?;
            let now = SystemClock.epoch_secs();
            print!("{}", format_jobset_jobs(project, &jobset, jobs.as_ref(), &hydra.links(), now));
        }
        JobsetCommand::Cancel { jobset } => {
            let cancelled = hydra
                .cancel_jobset(project, &jobset)
                .await
                .with_context(|| format!("cancelling {}/{}", project, jobset))?;
            println!("Cancelled {} build(s) of {}/{}", cancelled.len(), project, jobset);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "jobset_tests.rs"]
mod tests;
