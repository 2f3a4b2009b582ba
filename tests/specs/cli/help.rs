// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn hy_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("jobset")
        .stdout_has("monitor")
        .stdout_has("ci-watcher")
        .stdout_has("report")
        .stdout_has("maintenance")
        .stdout_has("build");
}

#[test]
fn hy_jobset_help_shows_subcommands() {
    cli()
        .args(&["jobset", "--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("create")
        .stdout_has("delete")
        .stdout_has("jobs")
        .stdout_has("cancel");
}

#[test]
fn hy_monitor_help_shows_report_options() {
    cli()
        .args(&["monitor", "--help"])
        .passes()
        .stdout_has("--timeout")
        .stdout_has("--json-report")
        .stdout_has("--json-report-extra");
}

#[test]
fn hy_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn hy_without_command_is_a_usage_error() {
    cli().exits_with(2).stderr_has("Usage:");
}

#[test]
fn bad_duration_is_a_usage_error() {
    cli()
        .args(&["monitor", "ros", "v1", "--timeout", "3w"])
        .exits_with(2)
        .stderr_has("--timeout");
}
