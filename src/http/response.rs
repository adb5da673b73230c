//! Response mapping.
//!
//! All gateway outcomes become JSON here; handlers never pick status codes
//! for backend results themselves.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::gateway::{HealthReport, HealthUnavailable, UploadError, UploadSuccess};

/// `{message, error?}` body used for every locally produced error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for HealthReport {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl IntoResponse for HealthUnavailable {
    fn into_response(self) -> Response {
        (StatusCode::SERVICE_UNAVAILABLE, Json(self)).into_response()
    }
}

impl IntoResponse for UploadSuccess {
    fn into_response(self) -> Response {
        (self.status, Json(self.payload)).into_response()
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match self {
            UploadError::MissingApiKey => {
                ErrorBody::new(UploadError::MissingApiKey.to_string())
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            }
            UploadError::Backend(failure) => {
                let status = failure.status;
                (status, Json(failure)).into_response()
            }
        }
    }
}
