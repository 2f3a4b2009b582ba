// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hy_adapters::{FakeHydraClient, HydraCall};
use hy_core::{JobsetRecord, JobsetStatus, RetentionPlan};

const NOW: i64 = 1_700_000_000;
const DAY: i64 = 24 * 60 * 60;

fn jobset(project: &str, name: &str, age_days: i64) -> JobsetStatus {
    JobsetStatus::builder().project(project).name(name).last_checked(Some(NOW - age_days * DAY)).build()
}

fn gc(pattern: &str) -> MaintenanceCommand {
    MaintenanceCommand::Gc {
        pattern: pattern.into(),
        retain: Duration::from_secs(14 * DAY as u64),
        retain_per_project: 1,
    }
}

#[tokio::test]
async fn deletes_stale_jobsets_in_matching_projects() {
    let hydra = FakeHydraClient::new();
    hydra.push_listing("ros", vec![jobset("ros", "new", 0), jobset("ros", "old", 30)]);
    hydra.push_listing("other", vec![jobset("other", "ancient", 90), jobset("other", "older", 100)]);

    handle(gc("ro*"), &hydra, NOW).await.unwrap();

    assert_eq!(
        hydra.mutations(),
        vec![HydraCall::DeleteJobset { project: "ros".into(), jobset: "old".into() }]
    );
    assert_eq!(hydra.jobsets("other").len(), 2);
}

#[tokio::test]
async fn invalid_pattern_is_rejected() {
    let hydra = FakeHydraClient::new();
    assert!(handle(gc("[unclosed"), &hydra, NOW).await.is_err());
    assert!(hydra.calls().is_empty());
}

#[test]
fn gc_lines() {
    let report = ProjectGc {
        project: "ros".into(),
        plan: RetentionPlan {
            retained: vec![JobsetRecord::new("ros", "keep", Some(NOW))],
            deleted: vec![JobsetRecord::new("ros", "drop", Some(0))],
        },
    };
    assert_eq!(
        format_gc(&report, NOW),
        vec![
            "Checking project ros".to_string(),
            "  Retaining ros/keep".to_string(),
            "  Deleting ros/drop from 1970-01-01 00:00:00".to_string(),
        ]
    );
}

#[test]
fn gc_requires_login() {
    assert_eq!(gc("*").login(), Login::Required);
}
