// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hy report` specs

use crate::prelude::*;

#[test]
fn report_add_creates_and_appends() {
    let ws = Workspace::new();
    let report = ws.path_str("report.json");

    cli()
        .args(&["report", "add", r#"{"test_pass": true}"#, "--json-report", &report])
        .passes()
        .stdout_is_empty();
    cli()
        .args(&[
            "report",
            "add",
            "--json-report",
            &report,
            "--json-report-name",
            "second",
            "--json-report-extra",
            "BRANCH|main|SHA|abc",
        ])
        .passes();

    let json = ws.report("report.json");
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0][0], "report");
    assert_eq!(entries[0][1]["test_pass"], true);
    assert_eq!(entries[1][0], "second");
    assert_eq!(entries[1][1]["extras"]["BRANCH"], "main");
    assert_eq!(entries[1][1]["extras"]["SHA"], "abc");
    assert!(entries[1][1]["report_time"].as_f64().unwrap() > 0.0);
}

#[test]
fn report_add_rejects_odd_extras() {
    let ws = Workspace::new();
    cli()
        .args(&[
            "report",
            "add",
            "--json-report",
            &ws.path_str("report.json"),
            "--json-report-extra",
            "a|b|c",
        ])
        .exits_with(1);
    assert!(!ws.path("report.json").exists());
}

#[test]
fn report_comment_for_missing_file() {
    let ws = Workspace::new();
    let missing = ws.path_str("missing.json");
    cli()
        .args(&["report", "comment", &missing])
        .passes()
        .stdout_eq(&format!("No json report file found at `{}`\n", missing));
}

#[test]
fn report_comment_renders_test_results_to_file() {
    let ws = Workspace::new();
    let report = ws.path_str("report.json");
    cli()
        .args(&[
            "report",
            "add",
            r#"{"test_pass": true}"#,
            "--json-report",
            &report,
            "--json-report-extra",
            "BUILD_URL|https://ci.example/job/7/",
        ])
        .passes();

    let comment = ws.path_str("comment.md");
    cli().args(&["report", "comment", &report, "--output", &comment]).passes().stdout_is_empty();
    assert_eq!(ws.read("comment.md"), "- ✅ [Test Results](https://ci.example/job/7/testReport/)\n");
}

#[test]
fn report_comment_hints_bundle_shell() {
    let ws = Workspace::new();
    let report = ws.path_str("report.json");
    let entry = r#"{
        "jobset_name": "v2.1",
        "jobset_url": "https://hydra.example/jobset/ros/v2.1",
        "start": 0.0, "end": 12.0, "duration": 12.0,
        "exit_code": 0, "message": "",
        "hydra_jobset_jobs": null,
        "job": {"name": "v2.1", "nrsucceeded": 3, "nrtotal": 3, "lastcheckedtime": 1}
    }"#;
    cli()
        .args(&[
            "report",
            "add",
            entry,
            "--json-report",
            &report,
            "--json-report-name",
            "Build Bundle",
            "--json-report-extra",
            "HYDRA_JOBSET_NAME|v2.1",
        ])
        .passes();

    cli()
        .args(&["report", "comment", &report])
        .env("HY_FLAKE_PREFIX", "github:acme/ros")
        .passes()
        .stdout_eq(
            "- ✅ [Build Bundle](https://hydra.example/jobset/ros/v2.1) (12s) \
             test with: `nix develop github:acme/ros/2.1#ros_desktop_full.ws`\n",
        );
}
