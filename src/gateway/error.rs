//! Gateway error types.

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::resilience::DeadlineExceeded;

/// Why a single backend attempt failed.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Deadline(#[from] DeadlineExceeded),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {status}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl AttemptError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AttemptError::Deadline(_) => "timeout",
            AttemptError::Transport(_) => "transport",
            AttemptError::Status { .. } => "status",
            AttemptError::Malformed(_) => "malformed",
        }
    }
}

/// Structured record of a failed upload attempt, surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{message}")]
pub struct UploadFailure {
    pub message: String,
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl UploadFailure {
    /// Used only if no attempt produced a record.
    pub fn unknown() -> Self {
        Self {
            message: "An unknown error occurred after attempting backend communication for upload."
                .to_string(),
            error: "Unknown backend error".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Outcome of `Gateway::forward_upload` when no payload could be returned.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("API key configuration missing for backend communication.")]
    MissingApiKey,

    #[error("{0}")]
    Backend(UploadFailure),
}

/// Errors constructing a `Gateway`.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no backend URLs configured")]
    NoBackends,

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
