//! # Prosel
//!
//! Client core of a hospital operations dashboard: sign-in and sign-up
//! forms, a session guard over one persisted user record, and four list
//! panels (patient priorities, transport scheduling, patient tracking,
//! incident logging) that read and write a remote REST API.
//!
//! ## Modules
//!
//! - [`model`]: Records and their closed status enumerations
//! - [`client`]: Resource and auth client traits, plus the reqwest transport
//! - [`panel`]: The generic list panel and its four configurations
//! - [`session`]: Session guard and its stores
//! - [`auth`]: Form validation, submission and notifications
//! - [`shell`]: Route table and sidebar selection
//! - [`config`]: TOML and environment configuration (native only)
//! - [`devapi`]: In-memory development backend (native only)
//!
//! The core compiles without the `native` feature so the browser front-end
//! can share it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prosel::client::{HttpClient, HttpClientConfig};
//! use prosel::model::Patient;
//! use prosel::panel::ListPanel;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new(HttpClientConfig::default())?;
//!
//!     let mut patients: ListPanel<Patient> = ListPanel::new();
//!     patients.load(&client).await?;
//!
//!     patients.draft.name = "Ana".to_string();
//!     patients.add(&client).await;
//!
//!     for patient in patients.visible() {
//!         println!("{} ({})", patient.name, patient.priority);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod model;
pub mod panel;
pub mod session;
pub mod shell;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod devapi;

#[cfg(test)]
mod testing;

// Re-export top-level types for convenience
pub use model::{
    Incident, NoStatus, Patient, Priority, RequestStatus, StatusEnum, Tracking, TrackingStatus,
    TransportRequest, UnknownStatus, User,
};

pub use client::{AuthClient, ClientError, Collection, Credentials, Registration, ResourceClient};

pub use panel::{
    Draft, Filter, IncidentDraft, ListPanel, Mutation, PatientDraft, Removable, Resource,
    TrackingDraft, TransportDraft, Updatable,
};

pub use session::{Guard, MemoryStore, Profile, Session, SessionError, SessionStore};

pub use auth::{
    authenticate, complete_sign_in, sign_out, submit_sign_in, submit_sign_up, Field,
    FieldErrors, Level, Notification, SignInForm, SignUpForm, Submission,
};

pub use shell::{navigate, Dashboard, PanelKind, Route};

#[cfg(feature = "native")]
pub use client::{HttpClient, HttpClientConfig};

#[cfg(feature = "native")]
pub use session::FileStore;

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};
