use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::auth::AuthUser;
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::db::queries::shipyards;
use crate::domain::shipyard::Shipyard;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
}

pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Shipyard>>, ApiError> {
    let name_filter = q.name.filter(|s| !s.trim().is_empty());
    let rows = shipyards::list(&state.db, name_filter.as_deref()).await?;
    Ok(Json(rows))
}

pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Shipyard>, ApiError> {
    shipyards::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("shipyard not found".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct ShipyardInput {
    pub name: String,
}

pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ShipyardInput>,
) -> Result<Json<Shipyard>, ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }
    let row = shipyards::create(&state.db, &input.name).await?;
    Ok(Json(row))
}

pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ShipyardInput>,
) -> Result<Json<Shipyard>, ApiError> {
    shipyards::update(&state.db, id, &input.name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("shipyard not found".to_string()))
}

pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(), ApiError> {
    if shipyards::delete(&state.db, id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound("shipyard not found".to_string()))
    }
}
