//! Auth Routes
//!
//! - POST /api/signin - 200 `{user}` or 401 `{message}`
//! - POST /api/signup - 201 `{message, user}`, 400 or 409 `{message}`

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::client::{Credentials, Registration};
use crate::devapi::dto::{parse_body, require, JsonBody, SignInResponse, SignUpResponse};
use crate::devapi::error::{ApiError, ApiResult};
use crate::devapi::state::{new_id, Account, AppState};
use crate::model::User;

/// POST /api/signin
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<SignInResponse>> {
    let credentials: Credentials = parse_body(body)?;
    let email = credentials.email.trim();

    let records = state.records.read().await;
    let account = records
        .accounts
        .iter()
        .find(|a| a.user.email.eq_ignore_ascii_case(email) && a.password == credentials.password)
        .ok_or_else(|| ApiError::Unauthorized("Credenciais inválidas".to_string()))?;

    tracing::info!(email = %account.user.email, "Signed in");

    Ok(Json(SignInResponse {
        user: account.user.clone(),
    }))
}

/// POST /api/signup
pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<SignUpResponse>)> {
    let registration: Registration = parse_body(body)?;
    let name = require(&registration.name, "Nome é obrigatório")?;
    let email = require(&registration.email, "Email é obrigatório")?;
    if registration.password.is_empty() {
        return Err(ApiError::Validation("Senha é obrigatória".to_string()));
    }

    let mut records = state.records.write().await;
    if records
        .accounts
        .iter()
        .any(|a| a.user.email.eq_ignore_ascii_case(&email))
    {
        return Err(ApiError::Conflict("Email já cadastrado".to_string()));
    }

    let user = User {
        id: new_id(),
        name,
        email,
        role: "user".to_string(),
    };
    records.accounts.push(Account {
        user: user.clone(),
        password: registration.password,
    });

    tracing::info!(email = %user.email, user_id = %user.id, "Registered user");

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "Usuário cadastrado com sucesso".to_string(),
            user,
        }),
    ))
}
