// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment configuration specs

use crate::prelude::*;

/// Nothing listens here; specs must fail before any request is sent.
const UNREACHABLE: &str = "http://127.0.0.1:9";

#[test]
fn missing_hydra_url_exits_one() {
    cli().args(&["jobset", "ros", "list"]).exits_with(1).stderr_has("HYDRA_URL is not set");
}

#[test]
fn mutating_command_without_credentials_exits_one() {
    cli()
        .env("HYDRA_URL", UNREACHABLE)
        .args(&["jobset", "ros", "delete", "v1"])
        .exits_with(1)
        .stderr_has("HYDRA_USERNAME and HYDRA_PASSWORD")
        .stdout_is_empty();
}

#[test]
fn gc_with_partial_credentials_exits_one() {
    cli()
        .env("HYDRA_URL", UNREACHABLE)
        .env("HYDRA_USERNAME", "ci")
        .args(&["maintenance", "gc"])
        .exits_with(1)
        .stderr_has("cannot login");
}

#[test]
fn invalid_hydra_url_exits_one() {
    cli().env("HYDRA_URL", "not a url").args(&["build", "1", "info"]).exits_with(1);
}
