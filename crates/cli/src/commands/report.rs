// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Report file command handlers

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use hy_core::{Clock, Links, SystemClock};
use hy_engine::{load_report, render_comment, ReportError, ReportSink};
use serde_json::Value;

use crate::exit_error::ExitError;

/// Report file options shared by commands that record their outcome.
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct ReportArgs {
    /// Add an entry to this JSON report file, creating it if needed
    #[arg(long, value_name = "FILE")]
    pub json_report: Option<PathBuf>,

    /// Name of the entry in the report
    #[arg(long, value_name = "NAME", default_value = "report")]
    pub json_report_name: String,

    /// Extra fields stored with the entry, as 'key1|value1|key2|value2'
    #[arg(long, value_name = "EXTRAS")]
    pub json_report_extra: Option<String>,
}

impl ReportArgs {
    /// Sink for the configured report file, if any.
    pub fn sink(&self) -> Result<Option<ReportSink>, ReportError> {
        self.json_report
            .as_ref()
            .map(|path| {
                ReportSink::new(path.clone(), self.json_report_name.clone())
                    .with_extras(self.json_report_extra.as_deref())
            })
            .transpose()
    }
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Add a JSON object as an entry of the report
    Add {
        /// JSON object to store
        #[arg(default_value = "{}")]
        json: String,

        #[command(flatten)]
        report: ReportArgs,
    },
    /// Render the merge-request comment for a report file
    Comment {
        /// Report file to render
        file: PathBuf,

        /// Write the comment to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

pub fn handle(command: ReportCommand, links: Option<Links>, flake_prefix: &str) -> Result<()> {
    match command {
        ReportCommand::Add { json, report } => {
            let body: Value = serde_json::from_str(&json)
                .map_err(|e| ExitError::failure(format!("invalid JSON entry: {}", e)))?;
            let sink = report
                .sink()
                .map_err(|e| ExitError::failure(e.to_string()))?
                .ok_or_else(|| ExitError::failure("report add requires --json-report"))?;
            sink.append(body, SystemClock.epoch_secs_f64())
                .map_err(|e| ExitError::failure(e.to_string()))?;
        }
        ReportCommand::Comment { file, output } => {
            let entries = if file.exists() { Some(load_report(&file)?) } else { None };
            let comment = render_comment(entries.as_deref(), &file, links.as_ref(), flake_prefix);
            match output {
                Some(path) => std::fs::write(&path, comment)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => print!("{}", comment),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
