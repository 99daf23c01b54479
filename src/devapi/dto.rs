//! Data Transfer Objects
//!
//! Request and response bodies that are not plain records.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ApiError, ApiResult};
use crate::model::{Priority, RequestStatus, TrackingStatus, User};

/// JSON request body whose rejections (bad syntax, wrong content type)
/// come back as `400 {message, code, request_id}` like every other error
pub struct JsonBody(pub Value);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for JsonBody {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(format!("Dados inválidos: {}", rejection.body_text()))
    }
}

/// Decode a JSON body, reporting failures as `400 {message}`
pub fn parse_body<T: serde::de::DeserializeOwned>(body: Value) -> ApiResult<T> {
    serde_json::from_value(body).map_err(|e| ApiError::Validation(format!("Dados inválidos: {}", e)))
}

/// Reject empty or whitespace-only text fields
pub fn require(value: &str, message: &str) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}

// ============================================
// AUTH DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub message: String,
    pub user: User,
}

// ============================================
// COLLECTION DTOs
// ============================================

#[derive(Debug, Deserialize)]
pub struct NewPatient {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Deserialize)]
pub struct PriorityPatch {
    pub priority: Priority,
}

#[derive(Debug, Deserialize)]
pub struct NewTransportRequest {
    #[serde(default)]
    pub patient: String,
}

#[derive(Debug, Deserialize)]
pub struct RequestStatusPatch {
    pub status: RequestStatus,
}

#[derive(Debug, Deserialize)]
pub struct NewTracking {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: TrackingStatus,
}

#[derive(Debug, Deserialize)]
pub struct TrackingStatusPatch {
    pub status: TrackingStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncident {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub registered_by: String,
}

// ============================================
// HEALTH DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub records: RecordCounts,
}

#[derive(Debug, Serialize)]
pub struct RecordCounts {
    pub accounts: usize,
    pub patients: usize,
    pub requests: usize,
    pub trackings: usize,
    pub incidents: usize,
}
