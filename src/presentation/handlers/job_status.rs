use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::domain::{Job, JobId};
use crate::presentation::state::AppState;

use super::responses::{JobResultBody, error_body};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub id: String,
    pub kind: String,
    pub status: String,
    pub progress: u8,
    pub message: String,
    pub created_at: String,
    pub completed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JobResultBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Job> for JobStatusResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id.to_string(),
            kind: job.kind.as_str().to_string(),
            status: job.status.as_str().to_string(),
            progress: job.progress,
            message: job.message,
            created_at: job.created_at.to_rfc3339(),
            completed_at: job.completed_at.map(|at| at.to_rfc3339()),
            result: job.result.map(Into::into),
            error: job.error,
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn job_status_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    let id: JobId = match job_id.parse() {
        Ok(id) => id,
        Err(_) => {
            return error_body(StatusCode::BAD_REQUEST, format!("Invalid job ID: {job_id}"));
        }
    };

    match state.job_registry.get(id).await {
        Ok(Some(job)) => (StatusCode::OK, Json(JobStatusResponse::from(job))).into_response(),
        Ok(None) => error_body(StatusCode::NOT_FOUND, format!("Job not found: {job_id}")),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job status");
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch job: {e}"),
            )
        }
    }
}
