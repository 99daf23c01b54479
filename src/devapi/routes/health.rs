//! Health Routes
//!
//! - GET /health - Liveness plus record counts

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::devapi::dto::{HealthResponse, RecordCounts};
use crate::devapi::state::AppState;

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let records = state.records.read().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: RecordCounts {
            accounts: records.accounts.len(),
            patients: records.patients.len(),
            requests: records.requests.len(),
            trackings: records.trackings.len(),
            incidents: records.incidents.len(),
        },
    })
}
