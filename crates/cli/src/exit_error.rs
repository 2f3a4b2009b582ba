// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

/// Generic or authentication failure.
pub const FAILURE: i32 = 1;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    /// Printed to stderr by `main`; empty when the command already reported.
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Exit with `code` without printing anything further.
    pub fn silent(code: i32) -> Self {
        Self::new(code, "")
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(FAILURE, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

impl From<crate::env::ConfigError> for ExitError {
    fn from(e: crate::env::ConfigError) -> Self {
        Self::failure(e.to_string())
    }
}

/// Map a command result to the process exit code and the line to print.
pub fn exit_status(result: &anyhow::Result<()>) -> (i32, Option<String>) {
    match result {
        Ok(()) => (0, None),
        Err(e) => match e.downcast_ref::<ExitError>() {
            Some(exit) if exit.message.is_empty() => (exit.code, None),
            Some(exit) => (exit.code, Some(exit.message.clone())),
            None => (FAILURE, Some(format!("Error: {:#}", e))),
        },
    }
}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
