// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build command handlers

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use hy_adapters::HydraApi;
use hy_core::BuildId;
use hy_engine::resolve_propagation;

use crate::output::build_info_tree;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Build to operate on
    pub id: BuildId,

    #[command(subcommand)]
    pub command: BuildCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum BuildCommand {
    /// Show a build with all of its steps
    Info,
}

/// Text for `build <id> info`.
pub async fn build_info(hydra: &dyn HydraApi, id: BuildId) -> Result<String> {
    let info = hydra.get_build_info(id).await.with_context(|| format!("fetching build {}", id))?;
    let pending = info.interpret().is_pending();
    let enriched = resolve_propagation(hydra, info).await;
    let mut text = build_info_tree(&enriched, &hydra.links()).render();
    if pending {
        text.push_str("Build ongoing, more steps may appear.\n");
    }
    Ok(text)
}

pub async fn handle(args: BuildArgs, hydra: &dyn HydraApi) -> Result<()> {
    match args.command {
        BuildCommand::Info => print!("{}", build_info(hydra, args.id).await?),
    }
    Ok(())
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
