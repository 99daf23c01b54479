//! Patient Routes
//!
//! - GET /api/patients - List patients
//! - POST /api/patients - Add a patient `{name, priority?}`
//! - PATCH /api/patients/:id - Change priority `{priority}`
//! - DELETE /api/patients/:id - Remove a patient

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::devapi::dto::{parse_body, require, JsonBody, NewPatient, PriorityPatch};
use crate::devapi::error::{ApiError, ApiResult};
use crate::devapi::state::{new_id, AppState};
use crate::model::Patient;

/// GET /api/patients
pub async fn list_patients(State(state): State<Arc<AppState>>) -> Json<Vec<Patient>> {
    Json(state.records.read().await.patients.clone())
}

/// POST /api/patients
pub async fn create_patient(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<Patient>)> {
    let req: NewPatient = parse_body(body)?;
    let patient = Patient {
        id: new_id(),
        name: require(&req.name, "Nome do paciente é obrigatório")?,
        priority: req.priority,
    };

    state.records.write().await.patients.push(patient.clone());
    tracing::info!(patient_id = %patient.id, priority = %patient.priority, "Created patient");

    Ok((StatusCode::CREATED, Json(patient)))
}

/// PATCH /api/patients/:id
pub async fn update_patient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<Patient>> {
    let patch: PriorityPatch = parse_body(body)?;

    let mut records = state.records.write().await;
    let patient = records
        .patients
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(ApiError::not_found)?;
    patient.priority = patch.priority;

    tracing::info!(patient_id = %id, priority = %patch.priority, "Updated priority");
    Ok(Json(patient.clone()))
}

/// DELETE /api/patients/:id
pub async fn delete_patient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut records = state.records.write().await;
    let before = records.patients.len();
    records.patients.retain(|p| p.id != id);
    if records.patients.len() == before {
        return Err(ApiError::not_found());
    }

    tracing::info!(patient_id = %id, "Removed patient");
    Ok(StatusCode::NO_CONTENT)
}
