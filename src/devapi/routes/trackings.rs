//! Tracking Routes
//!
//! - GET /api/trackings - List trackings
//! - POST /api/trackings - Start tracking `{name, status?}`
//! - PATCH /api/trackings/:id - Move to any status `{status}`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::devapi::dto::{parse_body, require, JsonBody, NewTracking, TrackingStatusPatch};
use crate::devapi::error::{ApiError, ApiResult};
use crate::devapi::state::{new_id, AppState};
use crate::model::Tracking;

/// GET /api/trackings
pub async fn list_trackings(State(state): State<Arc<AppState>>) -> Json<Vec<Tracking>> {
    Json(state.records.read().await.trackings.clone())
}

/// POST /api/trackings
pub async fn create_tracking(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<Tracking>)> {
    let req: NewTracking = parse_body(body)?;
    let tracking = Tracking {
        id: new_id(),
        name: require(&req.name, "Nome do paciente é obrigatório")?,
        status: req.status,
    };

    state.records.write().await.trackings.push(tracking.clone());
    tracing::info!(tracking_id = %tracking.id, status = %tracking.status, "Created tracking");

    Ok((StatusCode::CREATED, Json(tracking)))
}

/// PATCH /api/trackings/:id
pub async fn update_tracking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<Tracking>> {
    let patch: TrackingStatusPatch = parse_body(body)?;

    let mut records = state.records.write().await;
    let tracking = records
        .trackings
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(ApiError::not_found)?;
    tracking.status = patch.status;

    Ok(Json(tracking.clone()))
}
