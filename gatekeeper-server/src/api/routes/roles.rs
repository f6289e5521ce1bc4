use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::api::auth::AuthUser;
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::db::queries::roles;
use crate::domain::shipyard::Role;

pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Role>>, ApiError> {
    Ok(Json(roles::list(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct RoleInput {
    pub name: String,
}

pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RoleInput>,
) -> Result<Json<Role>, ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }
    Ok(Json(roles::create(&state.db, &input.name).await?))
}

pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(), ApiError> {
    if roles::delete(&state.db, id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound("role not found".to_string()))
    }
}
