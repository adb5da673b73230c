//! Upload forwarding to the analysis backends.
//!
//! # Responsibilities
//! - Order candidates, honouring an exact-match preferred URL
//! - POST the file as multipart to `{base}/analyze/` with `X-API-Key`
//! - Fall back on any failure and surface the most recent failure record
//!
//! # Design Decisions
//! - The analysis payload is opaque here and returned verbatim
//! - Each attempt builds its own multipart body; the file bytes are shared

use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::gateway::error::{AttemptError, UploadError, UploadFailure};
use crate::gateway::target::BackendTarget;
use crate::gateway::Gateway;
use crate::observability::{logging::truncate_for_log, metrics};
use crate::resilience::{first_success, with_deadline, AttemptRole};

/// Header carrying the backend API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Multipart field name used both inbound and outbound.
pub const FILE_FIELD: &str = "file";

/// A file received from the client, ready to forward.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadFile {
    fn to_part(&self) -> Part {
        let build = || {
            Part::stream_with_length(reqwest::Body::from(self.data.clone()), self.data.len() as u64)
                .file_name(self.file_name.clone())
        };
        match &self.content_type {
            Some(content_type) => build().mime_str(content_type).unwrap_or_else(|e| {
                tracing::debug!(content_type = %content_type, error = %e, "Dropping unparseable content type");
                build()
            }),
            None => build(),
        }
    }
}

/// Analysis payload returned by a backend.
#[derive(Debug, Clone)]
pub struct UploadSuccess {
    pub status: StatusCode,
    pub origin: BackendTarget,
    pub payload: Value,
}

impl Gateway {
    /// Forward `file` to the first backend that accepts it.
    ///
    /// Fails locally with `MissingApiKey` before any network call if no API
    /// key is configured.
    pub async fn forward_upload(
        &self,
        file: UploadFile,
        preferred: Option<&str>,
    ) -> Result<UploadSuccess, UploadError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!("API key not configured for upload");
            return Err(UploadError::MissingApiKey);
        };

        tracing::info!(
            file_name = %file.file_name,
            size = file.data.len(),
            content_type = file.content_type.as_deref().unwrap_or("unknown"),
            "Received file for upload"
        );

        let order = self.targets.ordered(preferred);
        let file = &file;

        match first_success(&order, |role, target| self.upload_one(role, target, file, api_key)).await {
            Ok(served) => {
                tracing::info!(backend = %served.value.origin, attempt = served.index + 1, "Upload analysed");
                Ok(served.value)
            }
            Err(exhausted) => {
                let failure = exhausted.last_error.unwrap_or_else(UploadFailure::unknown);
                tracing::error!(
                    attempts = exhausted.attempts,
                    status = %failure.status,
                    message = %failure.message,
                    "All backend upload attempts failed"
                );
                Err(UploadError::Backend(failure))
            }
        }
    }

    async fn upload_one(
        &self,
        role: AttemptRole,
        target: BackendTarget,
        file: &UploadFile,
        api_key: &str,
    ) -> Result<UploadSuccess, UploadFailure> {
        let url = target.endpoint("analyze/");
        tracing::info!(role = %role, url = %url, "Attempting upload");

        let result = with_deadline(
            &url,
            self.upload_timeout,
            self.post_analysis(role, &url, file, api_key),
        )
        .await;

        match result {
            Ok((status, payload)) => {
                metrics::record_attempt("upload", role, "success");
                Ok(UploadSuccess {
                    status,
                    origin: target,
                    payload,
                })
            }
            Err(AttemptError::Status { status, body }) => {
                tracing::error!(
                    role = %role,
                    backend = %target,
                    status = %status,
                    body = %truncate_for_log(&body),
                    "Backend upload error"
                );
                metrics::record_attempt("upload", role, "status");
                let also = match role {
                    AttemptRole::Primary => "",
                    AttemptRole::Fallback => "also ",
                };
                let message = format!(
                    "{} backend ({}) {}failed to process file.",
                    role.title(),
                    target,
                    also
                );
                Err(UploadFailure {
                    message,
                    error: body,
                    status,
                })
            }
            Err(e) => {
                tracing::error!(
                    role = %role,
                    backend = %target,
                    error = %e,
                    "Error connecting to backend for upload"
                );
                metrics::record_attempt("upload", role, e.kind());
                Err(UploadFailure {
                    message: format!("Error connecting to {} backend ({}) for upload.", role, target),
                    error: e.to_string(),
                    status: StatusCode::SERVICE_UNAVAILABLE,
                })
            }
        }
    }

    async fn post_analysis(
        &self,
        role: AttemptRole,
        url: &str,
        file: &UploadFile,
        api_key: &str,
    ) -> Result<(StatusCode, Value), AttemptError> {
        let form = Form::new().part(FILE_FIELD, file.to_part());

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| unreadable_error_body(role));
            return Err(AttemptError::Status { status, body });
        }

        let payload = response.json::<Value>().await?;
        Ok((status, payload))
    }
}

fn unreadable_error_body(role: AttemptRole) -> String {
    format!("Failed to read error response from {} backend.", role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_error_body_names_the_role() {
        assert_eq!(
            unreadable_error_body(AttemptRole::Primary),
            "Failed to read error response from primary backend."
        );
        assert_eq!(
            unreadable_error_body(AttemptRole::Fallback),
            "Failed to read error response from fallback backend."
        );
    }
}
