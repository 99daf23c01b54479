//! Application State
//!
//! In-memory collections shared by every handler. Nothing is persisted;
//! restarting the server starts from empty collections.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::model::{Incident, Patient, Tracking, TransportRequest, User};

/// Registered user plus the password they signed up with
#[derive(Debug, Clone)]
pub struct Account {
    pub user: User,
    pub password: String,
}

/// All collections served by the backend
#[derive(Debug, Default)]
pub struct Records {
    pub accounts: Vec<Account>,
    pub patients: Vec<Patient>,
    pub requests: Vec<TransportRequest>,
    pub trackings: Vec<Tracking>,
    pub incidents: Vec<Incident>,
}

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RwLock<Records>>,
    pub config: Arc<DevApiConfig>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: DevApiConfig) -> Self {
        Self {
            records: Arc::new(RwLock::new(Records::default())),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Server-assigned opaque identifier
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Dev API server configuration
#[derive(Debug, Clone)]
pub struct DevApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for DevApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl DevApiConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
