//! Transport Request Routes
//!
//! - GET /api/requests - List requests
//! - POST /api/requests - Schedule a transport `{patient}`, created pending
//! - PATCH /api/requests/:id - Accept or reject `{status}`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::devapi::dto::{parse_body, require, JsonBody, NewTransportRequest, RequestStatusPatch};
use crate::devapi::error::{ApiError, ApiResult};
use crate::devapi::state::{new_id, AppState};
use crate::model::{RequestStatus, TransportRequest};

/// GET /api/requests
pub async fn list_requests(State(state): State<Arc<AppState>>) -> Json<Vec<TransportRequest>> {
    Json(state.records.read().await.requests.clone())
}

/// POST /api/requests
pub async fn create_request(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<TransportRequest>)> {
    let req: NewTransportRequest = parse_body(body)?;
    let request = TransportRequest {
        id: new_id(),
        patient: require(&req.patient, "Nome do paciente é obrigatório")?,
        status: RequestStatus::Pending,
        created_at: Some(Utc::now()),
    };

    state.records.write().await.requests.push(request.clone());
    tracing::info!(request_id = %request.id, "Scheduled transport");

    Ok((StatusCode::CREATED, Json(request)))
}

/// PATCH /api/requests/:id
///
/// Any status is stored as sent; only the dashboard limits the choices.
pub async fn update_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<TransportRequest>> {
    let patch: RequestStatusPatch = parse_body(body)?;

    let mut records = state.records.write().await;
    let request = records
        .requests
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(ApiError::not_found)?;
    request.status = patch.status;

    tracing::info!(request_id = %id, status = %patch.status, "Updated transport request");
    Ok(Json(request.clone()))
}
