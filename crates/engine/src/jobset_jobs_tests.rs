// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hy_adapters::FakeHydraClient;
use hy_core::test_support::{build, propagated_step, step};

#[tokio::test]
async fn none_before_first_evaluation() {
    let hydra = FakeHydraClient::new();
    assert_eq!(collect_jobset_jobs(&hydra, "ros", "v1").await.unwrap(), None);
}

#[tokio::test]
async fn collects_builds_of_every_evaluation() {
    let hydra = FakeHydraClient::new();
    hydra.set_evals(
        "ros",
        "v1",
        vec![
            Evaluation { id: 1, builds: vec![BuildId(10), BuildId(11)] },
            Evaluation { id: 2, builds: vec![BuildId(11), BuildId(12)] },
        ],
    );
    hydra.add_build(build(10, Some(0), vec![step(10, 1, "a", Some(0))]));
    hydra.add_build(build(11, Some(2), vec![propagated_step(11, 1, "b", 12)]));
    hydra.add_build(build(12, Some(1), vec![step(12, 1, "b", Some(1))]));

    let jobs = collect_jobset_jobs(&hydra, "ros", "v1").await.unwrap().unwrap();

    assert_eq!(jobs.evals.len(), 2);
    assert_eq!(jobs.builds.keys().copied().collect::<Vec<_>>(), vec![BuildId(10), BuildId(11), BuildId(12)]);
    let enriched = &jobs.builds[&BuildId(11)];
    assert_eq!(enriched.link_for(1).map(|l| l.matching_steps.len()), Some(1));
    let second: Vec<BuildId> = jobs.builds_of(&jobs.evals[1]).map(|b| b.build.id).collect();
    assert_eq!(second, vec![BuildId(11), BuildId(12)]);
}

#[tokio::test]
async fn missing_build_fails_collection() {
    let hydra = FakeHydraClient::new();
    hydra.set_evals("ros", "v1", vec![Evaluation { id: 1, builds: vec![BuildId(99)] }]);

    let err = collect_jobset_jobs(&hydra, "ros", "v1").await.unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn serializes_builds_under_retrieved_key() {
    let mut jobs = JobsetJobs::default();
    jobs.evals.push(Evaluation { id: 1, builds: vec![BuildId(3)] });
    jobs.builds.insert(BuildId(3), EnrichedBuild::plain(build(3, Some(0), vec![])));

    let value = serde_json::to_value(&jobs).unwrap();

    assert_eq!(value["builds_retrieved"]["3"]["id"], 3);
    let back: JobsetJobs = serde_json::from_value(value).unwrap();
    assert_eq!(back, jobs);
}
