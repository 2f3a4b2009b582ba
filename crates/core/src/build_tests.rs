// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::Outcome;

#[yare::parameterized(
    store_path     = { "/nix/store/0a1b2c-hello-2.12.drv", "hello-2.12" },
    no_directory   = { "0a1b2c-ros-noetic-catkin.drv",     "ros-noetic-catkin" },
    no_hash        = { "/nix/store/plain.drv",             "plain" },
    no_extension   = { "/nix/store/0a1b2c-source",         "source" },
)]
fn derivation_name_strips_prefix_hash_and_extension(path: &str, expected: &str) {
    assert_eq!(derivation_name(path), expected);
}

#[test]
fn display_path_keeps_hash() {
    assert_eq!(display_drv_path("/nix/store/0a1b2c-hello.drv"), "0a1b2c-hello");
    assert_eq!(display_drv_path("relative"), "relative");
}

#[test]
fn deserializes_build_info_with_steps() {
    let json = r#"{
        "id": 41,
        "finished": 1,
        "buildstatus": 2,
        "nixname": "ros-noetic-desktop",
        "job": "desktop",
        "steps": [
            {"stepnr": 1, "drvpath": "/nix/store/aa-dep.drv", "status": 8, "busy": 0,
             "build": 41, "propagatedfrom": {"id": 17, "timestamp": 1}},
            {"stepnr": 2, "drvpath": "/nix/store/bb-desktop.drv", "status": null, "busy": 30,
             "build": 41, "propagatedfrom": null}
        ]
    }"#;
    let build: Build = serde_json::from_str(json).unwrap();
    assert_eq!(build.id, BuildId(41));
    assert!(build.finished);
    assert_eq!(build.interpret().label, "dependency failed");
    assert_eq!(build.steps.len(), 2);
    assert_eq!(build.steps[0].origin_build(), Some(BuildId(17)));
    assert_eq!(build.steps[0].name(), "dep");
    assert_eq!(build.steps[1].origin_build(), None);
    assert_eq!(build.steps[1].interpret().outcome, Outcome::Pending);
    assert_eq!(build.steps[1].interpret().label, "building");
}

#[test]
fn plain_build_record_has_no_steps() {
    let build: Build =
        serde_json::from_str(r#"{"id": 3, "finished": false, "buildstatus": null}"#).unwrap();
    assert!(build.steps.is_empty());
    assert!(!build.finished);
    assert_eq!(build.interpret().outcome, Outcome::Pending);
}

#[test]
fn build_id_parses_and_displays() {
    let id: BuildId = " 1234 ".parse().unwrap();
    assert_eq!(id, BuildId(1234));
    assert_eq!(id.to_string(), "1234");
    assert!("abc".parse::<BuildId>().is_err());
}

#[test]
fn build_id_round_trips_as_map_key() {
    let mut map = std::collections::BTreeMap::new();
    map.insert(BuildId(5), "five");
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"5":"five"}"#);
    let back: std::collections::BTreeMap<BuildId, String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back[&BuildId(5)], "five");
}
