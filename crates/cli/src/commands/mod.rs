// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod build;
pub mod jobset;
pub mod maintenance;
pub mod monitor;
pub mod report;
pub mod watch;

use crate::env;
use crate::exit_error::ExitError;
use crate::output::format_jobset_jobs;
use anyhow::{Context, Result};
use hy_adapters::{DryRunHydraClient, HttpHydraClient, HydraApi, RetryPolicy};
use hy_core::{Clock, JobsetStatus, Links, SystemClock};
use hy_engine::{JobsetJobs, ProgressObserver};

/// Whether a command needs an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Login {
    /// Read-only command.
    Never,
    /// Mutates only on some paths, such as cancelling after a timeout.
    IfAvailable,
    Required,
}

/// Connect to the control plane named by `HYDRA_URL`.
///
/// Under dry-run every mutation is recorded instead of sent and no
/// credentials are needed.
pub async fn connect(dry_run: bool, login: Login) -> Result<Box<dyn HydraApi>> {
    let base = env::hydra_url().map_err(ExitError::from)?;
    let client = HttpHydraClient::new(&base)
        .with_context(|| format!("invalid {} '{}'", env::HYDRA_URL, base))?
        .with_retry(RetryPolicy::new(env::retries()));

    if dry_run {
        return Ok(Box::new(DryRunHydraClient::new(client)));
    }

    let credentials = match (login, env::credentials()) {
        (Login::Never, _) => None,
        (_, Ok(credentials)) => Some(credentials),
        (Login::Required, Err(e)) => return Err(ExitError::from(e).into()),
        (Login::IfAvailable, Err(e)) => {
            tracing::warn!("{}; cancelling builds will fail", e);
            None
        }
    };
    if let Some(credentials) = credentials {
        tracing::info!(url = %base, username = %credentials.username, "logging in");
        client
            .login(&credentials.username, &credentials.password)
            .await
            .with_context(|| format!("login to {} failed", base))?;
    }
    Ok(Box::new(client))
}

/// Map a command's exit code onto the result `main` expects.
pub fn exit_with(code: i32) -> Result<()> {
    if code == 0 {
        Ok(())
    } else {
        Err(ExitError::silent(code).into())
    }
}

/// Prints status lines and jobset trees to stdout as polling commands run.
pub struct Terminal {
    links: Links,
}

impl Terminal {
    pub fn new(links: Links) -> Self {
        Self { links }
    }
}

impl ProgressObserver for Terminal {
    fn message(&self, line: &str) {
        println!("{}", line);
    }

    fn progress(&self, status: &JobsetStatus, jobs: Option<&JobsetJobs>) {
        let now = SystemClock.epoch_secs();
        print!("{}", format_jobset_jobs(&status.project, &status.name, jobs, &self.links, now));
    }
}
