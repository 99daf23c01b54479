//! Resource Client
//!
//! The seam between the panels and the hospital REST API. The traits are
//! transport-agnostic: the native build talks through reqwest
//! ([`HttpClient`]), the browser front-end through `fetch`.
//!
//! Each call is one request/response. There is no batching and no retry.

#[cfg(feature = "native")]
mod http;

#[cfg(feature = "native")]
pub use http::{HttpClient, HttpClientConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::model::User;

/// A named set of records exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Patients,
    Requests,
    Trackings,
    Incidents,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Patients,
        Collection::Requests,
        Collection::Trackings,
        Collection::Incidents,
    ];

    /// Path segment under the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Patients => "patients",
            Collection::Requests => "requests",
            Collection::Trackings => "trackings",
            Collection::Incidents => "incidents",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// CRUD access to the API collections.
///
/// Payloads are raw JSON so a malformed response can be detected and
/// degraded by the caller instead of failing inside the transport.
#[async_trait(?Send)]
pub trait ResourceClient {
    /// GET `/{collection}`
    async fn list(&self, collection: Collection) -> Result<Value, ClientError>;

    /// POST `/{collection}`, returning the created record
    async fn create(&self, collection: Collection, payload: &Value) -> Result<Value, ClientError>;

    /// PATCH `/{collection}/{id}`
    async fn update(&self, collection: Collection, id: &str, patch: &Value)
        -> Result<(), ClientError>;

    /// DELETE `/{collection}/{id}`
    async fn remove(&self, collection: Collection, id: &str) -> Result<(), ClientError>;
}

/// Sign-in and sign-up endpoints
#[async_trait(?Send)]
pub trait AuthClient {
    /// POST `/signin`, returning the authenticated user
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, ClientError>;

    /// POST `/signup`
    async fn sign_up(&self, registration: &Registration) -> Result<(), ClientError>;
}

/// Body of `POST /signin`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /signup`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful `POST /signin` body
#[derive(Debug, Deserialize)]
pub struct SignInResponse {
    pub user: User,
}

/// Error body the API sends with non-2xx responses
#[derive(Debug, Default, Deserialize)]
pub struct ErrorMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Errors surfaced by a resource or auth client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-2xx status
    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// The response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Server-provided message, if the API sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of the failed call, if there was a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
