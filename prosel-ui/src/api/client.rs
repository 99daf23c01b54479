//! HTTP API Client
//!
//! `gloo-net` implementation of the core client traits. The base URL comes
//! from `localStorage`, then the build-time `PROSEL_API_URL`, then the
//! default.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde_json::Value;

use prosel::client::{
    AuthClient, ClientError, Collection, Credentials, ErrorMessage, Registration,
    ResourceClient, SignInResponse,
};
use prosel::model::User;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:3001/api";

/// `localStorage` key overriding the base URL
const API_URL_KEY: &str = "prosel_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Get the API base URL from local storage, the build, or the default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .or_else(|| option_env!("PROSEL_API_URL").map(str::to_string))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(API_URL_KEY, url);
    }
}

/// Fetch-backed client, cheap to clone
#[derive(Debug, Clone)]
pub struct FetchClient {
    base_url: String,
}

impl FetchClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client for the currently configured base URL
    pub fn from_storage() -> Self {
        Self::new(get_api_base())
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}", self.base_url, collection.path())
    }

    fn record_url(&self, collection: Collection, id: &str) -> String {
        let id: String = js_sys::encode_uri_component(id).into();
        format!("{}/{}/{}", self.base_url, collection.path(), id)
    }
}

/// Map transport failures and non-2xx answers onto `ClientError`
async fn check(result: Result<Response, gloo_net::Error>) -> Result<Response, ClientError> {
    let response = result.map_err(|e| ClientError::Network(e.to_string()))?;
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body: ErrorMessage = response.json().await.unwrap_or_default();
    web_sys::console::error_1(&format!("API error {}: {:?}", status, body.message).into());
    Err(ClientError::Status {
        status,
        message: body.message,
    })
}

fn body_error(e: gloo_net::Error) -> ClientError {
    ClientError::Decode(e.to_string())
}

async fn json_body(response: Response) -> Result<Value, ClientError> {
    response.json().await.map_err(body_error)
}

#[async_trait(?Send)]
impl ResourceClient for FetchClient {
    async fn list(&self, collection: Collection) -> Result<Value, ClientError> {
        let response = check(Request::get(&self.collection_url(collection)).send().await).await?;
        json_body(response).await
    }

    async fn create(&self, collection: Collection, payload: &Value) -> Result<Value, ClientError> {
        let request = Request::post(&self.collection_url(collection))
            .json(payload)
            .map_err(body_error)?;
        let response = check(request.send().await).await?;
        json_body(response).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: &Value,
    ) -> Result<(), ClientError> {
        let request = Request::patch(&self.record_url(collection, id))
            .json(patch)
            .map_err(body_error)?;
        check(request.send().await).await?;
        Ok(())
    }

    async fn remove(&self, collection: Collection, id: &str) -> Result<(), ClientError> {
        check(Request::delete(&self.record_url(collection, id)).send().await).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthClient for FetchClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<User, ClientError> {
        let request = Request::post(&format!("{}/signin", self.base_url))
            .json(credentials)
            .map_err(body_error)?;
        let response = check(request.send().await).await?;
        let body: SignInResponse = response.json().await.map_err(body_error)?;
        Ok(body.user)
    }

    async fn sign_up(&self, registration: &Registration) -> Result<(), ClientError> {
        let request = Request::post(&format!("{}/signup", self.base_url))
            .json(registration)
            .map_err(body_error)?;
        check(request.send().await).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_record_url_is_encoded() {
        let client = FetchClient::new("http://localhost:3001/api/");
        assert_eq!(
            client.collection_url(Collection::Incidents),
            "http://localhost:3001/api/incidents"
        );
        assert_eq!(
            client.record_url(Collection::Patients, "a b/c"),
            "http://localhost:3001/api/patients/a%20b%2Fc"
        );
    }
}
