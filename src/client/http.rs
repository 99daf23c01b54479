//! HTTP Resource Client
//!
//! reqwest implementation of [`ResourceClient`] and [`AuthClient`] for the
//! native build.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

use super::{
    AuthClient, ClientError, Collection, Credentials, ErrorMessage, Registration,
    ResourceClient, SignInResponse,
};
use crate::model::User;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// API base URL, e.g. "http://localhost:3001/api"
    pub base_url: String,
    /// Per-request timeout. `None` keeps the transport default.
    pub request_timeout: Option<Duration>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001/api".to_string(),
            request_timeout: None,
        }
    }
}

/// REST client for the hospital API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client from configuration
    pub fn new(config: HttpClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The normalized base URL (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}", self.base_url, collection.path())
    }

    fn record_url(&self, collection: Collection, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            collection.path(),
            urlencoding::encode(id)
        )
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(map_transport_error)?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body: ErrorMessage = response.json().await.unwrap_or_default();
        Err(ClientError::Status {
            status,
            message: body.message,
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Network("Request timeout".to_string())
    } else if e.is_connect() {
        ClientError::Network(format!("API unavailable: {}", e))
    } else {
        ClientError::Network(e.to_string())
    }
}

async fn json_body(response: Response) -> Result<Value, ClientError> {
    response
        .json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl ResourceClient for HttpClient {
    async fn list(&self, collection: Collection) -> Result<Value, ClientError> {
        let url = self.collection_url(collection);
        tracing::debug!(%url, "GET");

        let response = self.send(self.client.get(&url)).await?;
        json_body(response).await
    }

    async fn create(&self, collection: Collection, payload: &Value) -> Result<Value, ClientError> {
        let url = self.collection_url(collection);
        tracing::debug!(%url, "POST");

        let response = self.send(self.client.post(&url).json(payload)).await?;
        json_body(response).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: &Value,
    ) -> Result<(), ClientError> {
        let url = self.record_url(collection, id);
        tracing::debug!(%url, "PATCH");

        self.send(self.client.patch(&url).json(patch)).await?;
        Ok(())
    }

    async fn remove(&self, collection: Collection, id: &str) -> Result<(), ClientError> {
        let url = self.record_url(collection, id);
        tracing::debug!(%url, "DELETE");

        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthClient for HttpClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, ClientError> {
        let url = format!("{}/signin", self.base_url);

        let response = self.send(self.client.post(&url).json(credentials)).await?;
        let body: SignInResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(body.user)
    }

    async fn sign_up(&self, registration: &Registration) -> Result<(), ClientError> {
        let url = format!("{}/signup", self.base_url);

        self.send(self.client.post(&url).json(registration)).await?;
        Ok(())
    }
}
