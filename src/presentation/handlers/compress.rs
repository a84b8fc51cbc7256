use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::domain::{
    DEFAULT_QUALITY_PERCENT, DEFAULT_SCALE_PERCENT, DestinationHints, Fidelity, TransferRequest,
};
use crate::presentation::state::AppState;

use super::responses::{error_body, outcome_response, transfer_error_response};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationHintsBody {
    pub container_id: Option<String>,
    pub owner_id: Option<String>,
    pub title: Option<String>,
}

impl From<DestinationHintsBody> for DestinationHints {
    fn from(body: DestinationHintsBody) -> Self {
        Self {
            container_id: body.container_id,
            owner_id: body.owner_id,
            title: body.title,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressRequest {
    pub source_ref: String,
    #[serde(default)]
    pub destination_hints: Option<DestinationHintsBody>,
    pub quality: Option<i64>,
    pub scale_factor: Option<i64>,
}

#[tracing::instrument(skip(state, payload))]
pub async fn compress_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompressRequest>, JsonRejection>,
) -> impl IntoResponse {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return error_body(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let fidelity = match parse_fidelity(body.quality, body.scale_factor) {
        Ok(fidelity) => fidelity,
        Err(message) => return error_body(StatusCode::BAD_REQUEST, message),
    };

    let hints = body.destination_hints.map(Into::into).unwrap_or_default();
    let request = TransferRequest::compress(body.source_ref, fidelity, hints);

    match state.compress_service.submit(request).await {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => transfer_error_response(&e),
    }
}

/// Maps the optional percent fields of a compress request to a fidelity,
/// filling in defaults for absent ones.
pub fn parse_fidelity(quality: Option<i64>, scale_factor: Option<i64>) -> Result<Fidelity, String> {
    let quality = percent("quality", quality.unwrap_or(i64::from(DEFAULT_QUALITY_PERCENT)))?;
    let scale = percent(
        "scaleFactor",
        scale_factor.unwrap_or(i64::from(DEFAULT_SCALE_PERCENT)),
    )?;
    Fidelity::from_percent(quality, scale).map_err(|e| e.to_string())
}

fn percent(name: &str, value: i64) -> Result<u8, String> {
    u8::try_from(value)
        .ok()
        .filter(|p| (1..=100).contains(p))
        .ok_or_else(|| format!("{name} must be between 1 and 100, got {value}"))
}
