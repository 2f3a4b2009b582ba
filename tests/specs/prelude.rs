// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for driving the `hy` binary.

use std::path::PathBuf;

use tempfile::TempDir;

/// Environment variables that would leak the caller's setup into a spec.
const ISOLATED_VARS: &[&str] = &[
    "HYDRA_URL",
    "HYDRA_USERNAME",
    "HYDRA_PASSWORD",
    "GITLAB_API_URL",
    "HY_RETRIES",
    "HY_FLAKE_PREFIX",
    "HY_LOG",
    "RUST_LOG",
    "COLOR",
];

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

/// `hy` with a clean environment.
pub fn cli() -> CliBuilder {
    let mut cmd = assert_cmd::Command::cargo_bin("hy").expect("hy binary is built");
    for var in ISOLATED_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    CliBuilder { cmd }
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit code 0.
    pub fn passes(mut self) -> RunAssert {
        RunAssert::new(self.cmd.assert().success())
    }

    /// Run and require the given exit code.
    pub fn exits_with(mut self, code: i32) -> RunAssert {
        RunAssert::new(self.cmd.assert().code(code))
    }
}

pub struct RunAssert {
    stdout: String,
    stderr: String,
}

impl RunAssert {
    fn new(assert: assert_cmd::assert::Assert) -> Self {
        let output = assert.get_output();
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {:?}:\n{}", needle, self.stdout);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout, expected);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {:?}:\n{}", needle, self.stderr);
        self
    }

    pub fn stdout_is_empty(self) -> Self {
        assert!(self.stdout.is_empty(), "unexpected stdout:\n{}", self.stdout);
        self
    }
}

/// Scratch directory for report files.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().expect("tempdir") }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn path_str(&self, name: &str) -> String {
        self.path(name).display().to_string()
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).expect("file exists")
    }

    pub fn report(&self, name: &str) -> serde_json::Value {
        serde_json::from_str(&self.read(name)).expect("report is valid JSON")
    }
}
