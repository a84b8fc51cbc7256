use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::domain::{DestinationHints, TransferRequest};
use crate::presentation::state::AppState;

use super::responses::{error_body, outcome_response, transfer_error_response};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub source_ref: String,
    pub folder_id: Option<String>,
    pub filename: Option<String>,
}

#[tracing::instrument(skip(state, payload))]
pub async fn relay_handler(
    State(state): State<AppState>,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> impl IntoResponse {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return error_body(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let hints = DestinationHints {
        container_id: body.folder_id,
        owner_id: None,
        title: body.filename,
    };
    let request = TransferRequest::relay(body.source_ref, hints);

    match state.relay_service.submit(request).await {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => transfer_error_response(&e),
    }
}
