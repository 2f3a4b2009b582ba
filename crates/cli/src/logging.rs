// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging to stderr; stdout is reserved for command output.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive used when neither `HY_LOG` nor `RUST_LOG` is set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Pick the filter directive; `-v` wins over the environment.
pub fn directive(verbose: bool, from_env: Option<String>) -> String {
    match from_env {
        Some(directive) if !verbose => directive,
        _ => default_directive(verbose).to_string(),
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_new(directive(verbose, crate::env::log_filter()))
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(crate::color::stderr_is_terminal()),
        )
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
