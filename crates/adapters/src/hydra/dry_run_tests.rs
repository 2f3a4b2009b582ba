// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::hydra::FakeHydraClient;
use hy_core::test_support::build;
use hy_core::Evaluation;

fn dry_run() -> DryRunHydraClient<FakeHydraClient> {
    let hydra = FakeHydraClient::new();
    hydra.push_listing("ros", vec![JobsetStatus::builder().name("v1").build()]);
    hydra.set_evals("ros", "v1", vec![Evaluation { id: 1, builds: vec![BuildId(5)] }]);
    hydra.add_build(build(5, None, vec![]));
    DryRunHydraClient::new(hydra)
}

#[tokio::test]
async fn reads_pass_through() {
    let client = dry_run();

    let jobsets = client.list_jobsets_status("ros").await.unwrap();

    assert_eq!(jobsets[0].name, "v1");
    assert!(client.calls().is_empty());
    assert_eq!(client.inner().calls().len(), 1);
}

#[tokio::test]
async fn mutations_are_recorded_not_sent() {
    let client = dry_run();
    let definition = JobsetDefinition::flake("ros/1", "");

    client.login("ci", "secret").await.unwrap();
    client.create_or_replace_jobset("ros", "v2", &definition).await.unwrap();
    client.delete_jobset("ros", "v1").await.unwrap();

    assert_eq!(
        client.calls(),
        vec![
            HydraCall::Login { username: "ci".into() },
            HydraCall::PutJobset { project: "ros".into(), jobset: "v2".into(), definition },
            HydraCall::PushJobset { project: "ros".into(), jobset: "v2".into() },
            HydraCall::DeleteJobset { project: "ros".into(), jobset: "v1".into() },
        ]
    );
    assert!(client.inner().calls().is_empty());
    assert_eq!(client.inner().jobsets("ros").len(), 1);
}

#[tokio::test]
async fn cancel_jobset_reads_but_does_not_cancel() {
    let client = dry_run();

    let cancelled = client.cancel_jobset("ros", "v1").await.unwrap();

    assert_eq!(cancelled, vec![BuildId(5)]);
    assert_eq!(client.calls(), vec![HydraCall::CancelBuild { id: BuildId(5) }]);
    assert!(client.inner().mutations().is_empty());
    assert_eq!(client.inner().build(BuildId(5)).map(|b| b.finished), Some(false));
}
