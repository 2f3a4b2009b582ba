// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown merge-request comment rendered from a report file.

use crate::jobset_jobs::JobsetJobs;
use crate::monitor::MonitorReport;
use crate::propagation::EnrichedBuild;
use crate::report::ReportEntry;
use hy_core::{derivation_name, Interpretation, Links, Outcome};
use serde_json::Value;
use std::fmt::Write;
use std::path::Path;

/// Report entry whose success makes a development shell available.
pub const BUNDLE_ENTRY: &str = "Build Bundle";
const BUNDLE_SHELL: &str = "ros_desktop_full.ws";

/// Render the comment for `entries`, or a notice when the report file is missing.
///
/// `links` overrides the control-plane base URL; by default it is recovered
/// from each entry's jobset URL. `flake_prefix` is used for the shell hint
/// of a succeeded bundle entry.
pub fn render_comment(
    entries: Option<&[ReportEntry]>,
    path: &Path,
    links: Option<&Links>,
    flake_prefix: &str,
) -> String {
    let mut lines = Vec::new();
    let Some(entries) = entries else {
        lines.push(format!("No json report file found at `{}`", path.display()));
        return finish(lines);
    };

    for (name, body) in entries {
        if body.get("hydra_jobset_jobs").is_some() {
            match serde_json::from_value::<MonitorReport>(body.clone()) {
                Ok(report) => {
                    let hint = bundle_hint(name, body, flake_prefix);
                    monitor_lines(&mut lines, name, &report, links, hint)
                }
                Err(e) => tracing::warn!(name = %name, error = %e, "skipping malformed monitor report"),
            }
        }
        if let Some(passed) = body.get("test_pass").and_then(Value::as_bool) {
            let url = body
                .get("extras")
                .and_then(|e| e.get("BUILD_URL"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            let icon = if passed { "✅" } else { "❌" };
            lines.push(format!("- {} [Test Results]({}testReport/)", icon, url));
        }
    }
    finish(lines)
}

fn finish(lines: Vec<String>) -> String {
    let mut comment = lines.join("\n");
    comment.push('\n');
    comment
}

/// Outcome of a monitor report; a report without a snapshot is a failure.
fn report_status(report: &MonitorReport) -> Interpretation {
    match &report.job {
        Some(job) => job.interpret(),
        None => Interpretation { outcome: Outcome::Failed, icon: "🟥", label: "no jobset status" },
    }
}

/// `nix develop` hint for the bundle entry, tagged from its jobset name.
fn bundle_hint(name: &str, body: &Value, flake_prefix: &str) -> Option<String> {
    if name != BUNDLE_ENTRY {
        return None;
    }
    let jobset = body.get("extras")?.get("HYDRA_JOBSET_NAME")?.as_str()?;
    let tag = jobset.strip_prefix('v').unwrap_or(jobset);
    Some(format!(" test with: `nix develop {}/{}#{}`", flake_prefix, tag, BUNDLE_SHELL))
}

fn monitor_lines(
    lines: &mut Vec<String>,
    name: &str,
    report: &MonitorReport,
    links: Option<&Links>,
    hint: Option<String>,
) {
    let status = report_status(report);
    let mut line = format!(
        "- {} [{}]({}) ({:.0}s)",
        status.icon, name, report.jobset_url, report.duration
    );
    match status.outcome {
        Outcome::Succeeded => {
            if let Some(hint) = hint {
                line.push_str(&hint);
            }
            lines.push(line);
        }
        Outcome::Pending => {
            let _ = write!(line, " {}", status.label);
            lines.push(line);
        }
        Outcome::Failed => {
            let _ = write!(line, " {}:", status.label);
            lines.push(line);
            let links = links.cloned().or_else(|| Links::from_jobset_url(&report.jobset_url));
            if let (Some(jobs), Some(links)) = (&report.hydra_jobset_jobs, links) {
                failed_build_lines(lines, jobs, &links);
            }
        }
    }
}

fn failed_build_lines(lines: &mut Vec<String>, jobs: &JobsetJobs, links: &Links) {
    for eval in &jobs.evals {
        // Every build is listed, usable bundles matter even when others failed
        for enriched in jobs.builds_of(eval) {
            let build = &enriched.build;
            let build_url = links.build(build.id);
            lines.push(format!("  - {} [{}]({})", build.interpret().icon, build.job, build_url));
            step_lines(lines, enriched, &build_url, links);
        }
    }
}

fn step_lines(lines: &mut Vec<String>, enriched: &EnrichedBuild, build_url: &str, links: &Links) {
    for step in &enriched.build.steps {
        let status = step.interpret();
        if !status.is_failed() {
            continue;
        }
        let mut log_url = links.step_log(step.build_id, step.step_nr);
        let mut suffix = "";
        if let Some(link) = enriched.link_for(step.step_nr) {
            match link.matching_steps.as_slice() {
                [] => {}
                [origin] => {
                    log_url = links.step_log(origin.build_id, origin.step_nr);
                    suffix = " (propagated)";
                }
                _ => {
                    log_url = build_url.to_string();
                    suffix = " (multiple propagated steps; linking to build url)";
                }
            }
        }
        lines.push(format!(
            "    - {} [{}]({}){}",
            status.icon,
            derivation_name(&step.drv_path),
            log_url,
            suffix
        ));
    }
}

#[cfg(test)]
#[path = "comment_tests.rs"]
mod tests;
