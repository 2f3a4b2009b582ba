// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON report file shared by successive commands of a CI pipeline.
//!
//! The file holds an array of `[name, body]` pairs. Appending reads the whole
//! file, adds one entry, and atomically replaces it. Concurrent writers are
//! not coordinated; the last one wins.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One report entry: its name and body object.
pub type ReportEntry = (String, Value);

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to access report {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("malformed report {path}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
    #[error("report extras must be key|value pairs, got {0} fields")]
    OddExtras(usize),
    #[error("report body must be a JSON object")]
    NotAnObject,
}

/// Parse `k1|v1|k2|v2` into an object of string values.
pub fn parse_extras(spec: &str) -> Result<Map<String, Value>, ReportError> {
    let fields: Vec<&str> = spec.split('|').collect();
    if fields.len() % 2 != 0 {
        return Err(ReportError::OddExtras(fields.len()));
    }
    Ok(fields
        .chunks(2)
        .map(|pair| (pair[0].to_string(), Value::String(pair[1].to_string())))
        .collect())
}

/// Read all entries; a missing file is an empty report.
pub fn load_report(path: &Path) -> Result<Vec<ReportEntry>, ReportError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(ReportError::Io { path: path.to_path_buf(), source }),
    };
    serde_json::from_str(&text).map_err(|source| ReportError::Json { path: path.to_path_buf(), source })
}

/// Destination for report entries written by one command.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSink {
    path: PathBuf,
    name: String,
    extras: Map<String, Value>,
}

impl ReportSink {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), extras: Map::new() }
    }

    /// Attach extras given as `k1|v1|k2|v2`.
    pub fn with_extras(mut self, spec: Option<&str>) -> Result<Self, ReportError> {
        if let Some(spec) = spec {
            self.extras = parse_extras(spec)?;
        }
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `body` with `extras` and `report_time` (unix seconds) added.
    pub fn append(&self, body: Value, report_time: f64) -> Result<(), ReportError> {
        let Value::Object(mut body) = body else {
            return Err(ReportError::NotAnObject);
        };
        body.insert("extras".to_string(), Value::Object(self.extras.clone()));
        body.insert("report_time".to_string(), Value::from(report_time));

        let mut entries = load_report(&self.path)?;
        entries.push((self.name.clone(), Value::Object(body)));
        self.write(&entries)?;
        tracing::info!(path = %self.path.display(), name = %self.name, entries = entries.len(), "report entry added");
        Ok(())
    }

    fn write(&self, entries: &[ReportEntry]) -> Result<(), ReportError> {
        let io_err = |source| ReportError::Io { path: self.path.clone(), source };
        let json = serde_json::to_string_pretty(entries)
            .map_err(|source| ReportError::Json { path: self.path.clone(), source })?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json.as_bytes()).map_err(io_err)?;
        std::fs::rename(&tmp_path, &self.path).map_err(io_err)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
