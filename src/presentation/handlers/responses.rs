use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{SubmitOutcome, TransferError};
use crate::domain::JobResult;

pub const JOBS_PATH: &str = "/api/v1/jobs";

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResultBody {
    pub original_size: u64,
    pub transformed_size: u64,
    pub reduction_percent: f64,
    pub destination_handle: String,
    pub title: String,
}

impl From<JobResult> for JobResultBody {
    fn from(result: JobResult) -> Self {
        Self {
            original_size: result.original_size,
            transformed_size: result.transformed_size,
            reduction_percent: result.reduction_percent,
            destination_handle: result.destination_handle,
            title: result.title,
        }
    }
}

#[derive(Serialize)]
pub struct CompletedResponse {
    pub success: bool,
    pub result: JobResultBody,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedResponse {
    pub success: bool,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub job_id: String,
    pub status_url: String,
}

pub fn error_body(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.into(),
        }),
    )
        .into_response()
}

pub fn outcome_response(outcome: SubmitOutcome) -> Response {
    match outcome {
        SubmitOutcome::Completed(result) => (
            StatusCode::OK,
            Json(CompletedResponse {
                success: true,
                result: result.into(),
            }),
        )
            .into_response(),
        SubmitOutcome::Accepted(job_id) => (
            StatusCode::ACCEPTED,
            Json(AcceptedResponse {
                success: true,
                is_async: true,
                job_id: job_id.to_string(),
                status_url: format!("{JOBS_PATH}/{job_id}"),
            }),
        )
            .into_response(),
    }
}

pub fn transfer_error_response(error: &TransferError) -> Response {
    let status = match error {
        TransferError::Validation(_) => StatusCode::BAD_REQUEST,
        TransferError::Upstream(_) => StatusCode::BAD_GATEWAY,
        TransferError::Engine(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TransferError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        TransferError::Registry(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() || status == StatusCode::BAD_GATEWAY {
        tracing::error!(error = %error, "Transfer failed");
    } else {
        tracing::warn!(error = %error, "Transfer rejected");
    }
    error_body(status, error.to_string())
}
