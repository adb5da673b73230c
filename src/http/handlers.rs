use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::time::Instant;

use crate::gateway::{upload::FILE_FIELD, UploadFile};
use crate::http::response::ErrorBody;
use crate::http::server::AppState;
use crate::observability::metrics;

#[derive(Debug, Default, Deserialize)]
pub struct UploadParams {
    #[serde(rename = "preferredUrl")]
    pub preferred_url: Option<String>,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Response {
    let start = Instant::now();

    let response = match state.gateway.probe_health().await {
        Ok(report) => report.into_response(),
        Err(unavailable) => unavailable.into_response(),
    };

    metrics::record_request("health", response.status().as_u16(), start);
    response
}

/// `POST /upload?preferredUrl=...` with multipart field `file`.
pub async fn upload(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let start = Instant::now();

    let response = match multipart {
        Ok(multipart) => match read_file_field(multipart).await {
            Ok(Some(file)) => match state
                .gateway
                .forward_upload(file, params.preferred_url.as_deref())
                .await
            {
                Ok(success) => success.into_response(),
                Err(e) => e.into_response(),
            },
            Ok(None) => {
                tracing::warn!("Upload request without a file field");
                ErrorBody::new("No file uploaded.").into_response_with(StatusCode::BAD_REQUEST)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart upload");
                ErrorBody::new("Failed to process upload request.")
                    .with_error(e.body_text())
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            }
        },
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Upload request is not multipart");
            ErrorBody::new("No file uploaded.")
                .with_error(rejection.body_text())
                .into_response_with(StatusCode::BAD_REQUEST)
        }
    };

    metrics::record_request("upload", response.status().as_u16(), start);
    response
}

/// Pull the `file` field out of the form, skipping any other fields.
async fn read_file_field(mut multipart: Multipart) -> Result<Option<UploadFile>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        return Ok(Some(UploadFile {
            file_name,
            content_type,
            data,
        }));
    }
    Ok(None)
}
