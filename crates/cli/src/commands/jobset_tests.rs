// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hy_adapters::{FakeHydraClient, HydraCall};
use hy_core::test_support::build;
use hy_core::{BuildId, Evaluation, JobsetStatus};

fn jobset(name: &str) -> JobsetStatus {
    JobsetStatus::builder().name(name).project("ros").build()
}

#[yare::parameterized(
    list   = { JobsetCommand::List,                              Login::Never },
    jobs   = { JobsetCommand::Jobs { jobset: "v1".into() },      Login::Never },
    delete = { JobsetCommand::Delete { jobset: "v1".into() },    Login::Required },
    cancel = { JobsetCommand::Cancel { jobset: "v1".into() },    Login::Required },
)]
fn login_requirements(command: JobsetCommand, expected: Login) {
    assert_eq!(command.login(), expected);
}

#[tokio::test]
async fn create_replaces_existing_jobset() {
    let hydra = FakeHydraClient::new();
    hydra.push_listing("ros", vec![jobset("v1.0")]);

    let command = JobsetCommand::Create {
        input: "1.0".into(),
        name: None,
        description: "nightly".into(),
    };
    handle("ros", command, &hydra, "ros").await.unwrap();

    let mutations = hydra.mutations();
    assert_eq!(
        mutations[0],
        HydraCall::DeleteJobset { project: "ros".into(), jobset: "v1.0".into() }
    );
    assert!(matches!(&mutations[1], HydraCall::PutJobset { definition, .. } if definition.flake == "ros/1.0"));
    assert_eq!(mutations[2], HydraCall::PushJobset { project: "ros".into(), jobset: "v1.0".into() });
}

#[tokio::test]
async fn delete_missing_jobset_fails() {
    let hydra = FakeHydraClient::new();
    hydra.push_listing("ros", vec![]);
    let err = handle("ros", JobsetCommand::Delete { jobset: "gone".into() }, &hydra, "ros")
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("deleting ros/gone"));
}

#[tokio::test]
async fn cancel_only_touches_unfinished_builds() {
    let hydra = FakeHydraClient::new();
    hydra.set_evals("ros", "v1", vec![Evaluation { id: 1, builds: vec![BuildId(1), BuildId(2)] }]);
    hydra.add_build(build(1, Some(0), vec![]));
    hydra.add_build(build(2, None, vec![]));

    handle("ros", JobsetCommand::Cancel { jobset: "v1".into() }, &hydra, "ros").await.unwrap();

    assert_eq!(hydra.mutations(), vec![HydraCall::CancelBuild { id: BuildId(2) }]);
    assert_eq!(hydra.build(BuildId(2)).map(|b| b.finished), Some(true));
}

#[tokio::test]
async fn listing_unknown_project_fails() {
    let hydra = FakeHydraClient::new();
    assert!(handle("nope", JobsetCommand::List, &hydra, "ros").await.is_err());
}
