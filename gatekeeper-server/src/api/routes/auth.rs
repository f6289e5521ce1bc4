use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::auth::{hash_password, issue_token, verify_password};
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::db::queries::users;

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// The query matches on `username` alone; the password is verified
/// against the stored Argon2 hash, never via a `(username, password)`
/// equality scan.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = users::find_by_username(&state.db, &input.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("invalid username or password".to_string()))?;

    if !verify_password(&input.password, &user.password_hash) {
        return Err(ApiError::Unauthorized("invalid username or password".to_string()));
    }

    let token = issue_token(&state.config.secret_key, &user.username)?;
    Ok(Json(LoginResponse { token }))
}

#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
}

/// Administrative bootstrap endpoint for provisioning operator
/// accounts; not part of the core ingestion path.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<LoginResponse>, ApiError> {
    if input.username.trim().is_empty() || input.password.is_empty() {
        return Err(ApiError::BadRequest("username and password are required".to_string()));
    }
    let password_hash = hash_password(&input.password)?;
    let user = users::create(&state.db, &input.username, &password_hash).await?;
    let token = issue_token(&state.config.secret_key, &user.username)?;
    Ok(Json(LoginResponse { token }))
}
