//! Incident Routes
//!
//! - GET /api/incidents - List incidents
//! - POST /api/incidents - Log an incident `{description, registeredBy}`
//! - DELETE /api/incidents/:id - Remove an incident

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::devapi::dto::{parse_body, require, JsonBody, NewIncident};
use crate::devapi::error::{ApiError, ApiResult};
use crate::devapi::state::{new_id, AppState};
use crate::model::Incident;

/// GET /api/incidents
pub async fn list_incidents(State(state): State<Arc<AppState>>) -> Json<Vec<Incident>> {
    Json(state.records.read().await.incidents.clone())
}

/// POST /api/incidents
pub async fn create_incident(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<Incident>)> {
    let req: NewIncident = parse_body(body)?;
    let incident = Incident {
        id: new_id(),
        description: require(&req.description, "Descrição é obrigatória")?,
        registered_by: require(&req.registered_by, "Responsável pelo registro é obrigatório")?,
        created_at: Some(Utc::now()),
    };

    state.records.write().await.incidents.push(incident.clone());
    tracing::info!(incident_id = %incident.id, registered_by = %incident.registered_by, "Logged incident");

    Ok((StatusCode::CREATED, Json(incident)))
}

/// DELETE /api/incidents/:id
pub async fn delete_incident(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut records = state.records.write().await;
    let before = records.incidents.len();
    records.incidents.retain(|i| i.id != id);
    if records.incidents.len() == before {
        return Err(ApiError::not_found());
    }

    tracing::info!(incident_id = %id, "Removed incident");
    Ok(StatusCode::NO_CONTENT)
}
