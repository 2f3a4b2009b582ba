// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::report::ReportError;
use hy_adapters::ApiError;
use thiserror::Error;

/// Errors that end an engine operation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
