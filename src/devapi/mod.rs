//! Development Backend
//!
//! In-memory stand-in for the hospital REST API, built with Axum. It serves
//! the same contract the dashboard expects so the front-ends and the
//! integration tests have something to talk to.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /api/signin` - Sign in with email and password
//! - `POST /api/signup` - Register an account
//!
//! ## Collections
//! - `GET|POST /api/patients`, `PATCH|DELETE /api/patients/:id`
//! - `GET|POST /api/requests`, `PATCH /api/requests/:id`
//! - `GET|POST /api/trackings`, `PATCH /api/trackings/:id`
//! - `GET|POST /api/incidents`, `DELETE /api/incidents/:id`
//!
//! ## Health
//! - `GET /health` - Liveness and record counts
//!
//! # Example
//!
//! ```rust,ignore
//! use prosel::devapi::{serve, AppState, DevApiConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DevApiConfig::new("127.0.0.1", 3001);
//!     serve(AppState::new(config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{AppState, DevApiConfig};

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Auth routes
        .route("/signin", post(routes::auth::sign_in))
        .route("/signup", post(routes::auth::sign_up))
        // Patient routes
        .route(
            "/patients",
            get(routes::patients::list_patients).post(routes::patients::create_patient),
        )
        .route(
            "/patients/:id",
            patch(routes::patients::update_patient).delete(routes::patients::delete_patient),
        )
        // Transport request routes
        .route(
            "/requests",
            get(routes::requests::list_requests).post(routes::requests::create_request),
        )
        .route("/requests/:id", patch(routes::requests::update_request))
        // Tracking routes
        .route(
            "/trackings",
            get(routes::trackings::list_trackings).post(routes::trackings::create_tracking),
        )
        .route("/trackings/:id", patch(routes::trackings::update_tracking))
        // Incident routes
        .route(
            "/incidents",
            get(routes::incidents::list_incidents).post(routes::incidents::create_incident),
        )
        .route(
            "/incidents/:id",
            axum::routing::delete(routes::incidents::delete_incident),
        );

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        // The browser dashboard is served from another origin
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the development backend
pub async fn serve(state: AppState, config: &DevApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Prosel dev API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Prosel dev API shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}


/// Drives the reqwest client, the panels and the auth flows against a live
/// server on an ephemeral port.
#[cfg(test)]
mod end_to_end {
    use super::*;
    use crate::auth::{submit_sign_in, submit_sign_up, Level, SignInForm, SignUpForm};
    use crate::client::{HttpClient, HttpClientConfig};
    use crate::model::{Incident, Patient, Priority, RequestStatus, TransportRequest};
    use crate::panel::{Filter, ListPanel, Mutation};
    use crate::session::{MemoryStore, Session};
    use crate::shell::Route;

    async fn spawn_server() -> HttpClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = build_router(AppState::new(DevApiConfig::default()));
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        HttpClient::new(HttpClientConfig {
            base_url: format!("http://{}/api", addr),
            request_timeout: Some(std::time::Duration::from_secs(5)),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_patient_panel_round() {
        let client = spawn_server().await;
        let mut panel: ListPanel<Patient> = ListPanel::new();
        panel.load(&client).await.unwrap();
        assert!(panel.items().is_empty());

        panel.draft.name = "Ana".to_string();
        panel.draft.priority = Priority::High;
        assert_eq!(panel.add(&client).await, Mutation::Applied);
        assert_eq!(panel.items().len(), 1);
        assert!(panel.draft.name.is_empty());

        let id = panel.items()[0].id.clone();
        assert!(panel
            .set_status(&client, &id, Priority::Low)
            .await
            .is_applied());
        assert_eq!(panel.items()[0].priority, Priority::Low);

        assert!(panel.remove(&client, &id).await.is_applied());
        assert!(panel.items().is_empty());

        let missing = panel.remove(&client, &id).await;
        assert!(matches!(missing, Mutation::Failed(ref e) if e.status() == Some(404)));
    }

    #[tokio::test]
    async fn test_request_filtering() {
        let client = spawn_server().await;
        let mut panel: ListPanel<TransportRequest> = ListPanel::new();

        for name in ["Ana", "Bruno", "Carla"] {
            panel.draft.patient = name.to_string();
            assert!(panel.add(&client).await.is_applied());
        }
        let ids: Vec<String> = panel.items().iter().map(|r| r.id.clone()).collect();
        panel
            .set_status(&client, &ids[1], RequestStatus::Accepted)
            .await;
        panel
            .set_status(&client, &ids[2], RequestStatus::Rejected)
            .await;

        panel.apply_filter("Pendente".parse().unwrap());
        let visible = panel.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].patient, "Ana");

        panel.apply_filter(Filter::All);
        assert_eq!(panel.visible().len(), 3);
    }

    #[tokio::test]
    async fn test_incident_removal() {
        let client = spawn_server().await;
        let mut panel: ListPanel<Incident> = ListPanel::new();

        panel.draft.description = "Queda no corredor".to_string();
        panel.draft.registered_by = "Ana".to_string();
        assert!(panel.add(&client).await.is_applied());
        let id = panel.items()[0].id.clone();
        assert!(panel.items()[0].created_at.is_some());

        assert!(panel.remove(&client, &id).await.is_applied());
        assert!(panel.find(&id).is_none());
    }

    #[tokio::test]
    async fn test_auth_flows() {
        let client = spawn_server().await;
        let mut session = Session::open(MemoryStore::new());

        let sign_in_form = SignInForm {
            email: "ana@x.com".to_string(),
            password: "abcdef".to_string(),
        };
        let result = submit_sign_in(&sign_in_form, &client, &mut session).await;
        let toast = result.notification().unwrap();
        assert_eq!(toast.level, Level::Error);
        assert_eq!(toast.description, "Credenciais inválidas");
        assert!(!session.is_signed_in());

        let form = SignUpForm {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            password: "abcdef".to_string(),
            confirm_password: "abcdef".to_string(),
        };
        let result = submit_sign_up(&form, &client).await;
        assert_eq!(result.navigate(), Some(Route::SignIn));
        assert!(!session.is_signed_in());

        let result = submit_sign_in(&sign_in_form, &client, &mut session).await;
        assert_eq!(result.navigate(), Some(Route::Dashboard));
        assert_eq!(session.user().map(|u| u.name.as_str()), Some("Ana"));
    }
}
