//! Alert Routes - Batch intake for rule optimization
//!
//! Each group in the posted batch is optimized and saved on its own; the
//! response lists a per-group outcome so one bad group never hides the
//! results of the others.

use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use rulesmith::{DomainError, GroupOutcome};

use crate::AppState;

/// Batch processing response
#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessAlertsResponse {
    pub batch_id: Uuid,
    pub message: String,
    /// Review files written, in input order
    pub saved_files: Vec<String>,
    /// Per-group outcome (`status` is `saved` or `error`)
    #[schema(value_type = Vec<Object>)]
    pub results: Vec<GroupOutcome>,
}

/// Client error payload
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(err: DomainError) -> ApiError {
    tracing::warn!("Rejected alert batch: {}", err);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Decode the request body into raw batch elements
fn parse_batch(body: &[u8]) -> Result<Vec<Value>, DomainError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DomainError::MalformedRequest(
            "No alert data received".to_string(),
        ));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| DomainError::MalformedRequest(format!("Invalid JSON: {e}")))?;

    match value {
        Value::Array(groups) => Ok(groups),
        Value::Null => Err(DomainError::MalformedRequest(
            "No alert data received".to_string(),
        )),
        _ => Err(DomainError::MalformedRequest(
            "Expected a JSON array of alert groups".to_string(),
        )),
    }
}

fn batch_message(saved: usize, errors: usize) -> String {
    match (saved, errors) {
        (_, 0) => "Alerts processed, rules saved.".to_string(),
        (0, _) => format!("Alerts processed, no rules saved; all {errors} groups failed."),
        _ => format!(
            "Alerts processed, rules saved; {} of {} groups failed.",
            errors,
            saved + errors
        ),
    }
}

/// Optimize rules for a batch of alert groups
#[utoipa::path(
    post,
    path = "/process_alerts",
    request_body = Vec<AlertGroup>,
    responses(
        (status = 200, description = "Batch processed; see per-group results", body = ProcessAlertsResponse),
        (status = 400, description = "Body absent or not a JSON array", body = ErrorResponse),
        (status = 401, description = "Missing or invalid API key")
    ),
    tag = "Alerts"
)]
pub async fn process_alerts(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProcessAlertsResponse>, ApiError> {
    let groups = parse_batch(&body).map_err(bad_request)?;
    let batch_id = Uuid::new_v4();

    tracing::info!("📥 Batch {} received: {} groups", batch_id, groups.len());

    let report = state.batch.process(groups).await;

    let saved_files = report.saved_files();
    let message = batch_message(saved_files.len(), report.error_count());

    Ok(Json(ProcessAlertsResponse {
        batch_id,
        message,
        saved_files,
        results: report.outcomes,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/process_alerts", post(process_alerts))
}
