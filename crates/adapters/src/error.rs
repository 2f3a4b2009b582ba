// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from control-plane and pipeline API calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("{method} {path} returned {status}: {body}")]
    Status { method: String, path: String, status: u16, body: String },
    #[error("invalid response from {path}: {message}")]
    Decode { path: String, message: String },
    #[error("invalid url: {0}")]
    Url(String),
}

impl ApiError {
    /// Whether retrying the same request may succeed.
    ///
    /// Transport failures, server errors, 408 and 429 are transient. Every
    /// other status and all decode errors are definitive.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => {
                *status >= 500 || *status == 408 || *status == 429
            }
            ApiError::Decode { .. } | ApiError::Url(_) => false,
        }
    }

    /// HTTP status of a definitive response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        ApiError::Url(e.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
