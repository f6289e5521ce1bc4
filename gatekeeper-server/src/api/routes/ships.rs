use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::auth::AuthUser;
use crate::api::error::ApiError;
use crate::api::pagination::{Page, PageQuery, MAX_PAGE_SIZE};
use crate::api::state::AppState;
use crate::db::queries::ships::{self, ShipFilter};
use crate::domain::shipyard::Ship;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
    #[serde(flatten)]
    pub page: PageQuery,
}

/// Ship is a "requires a filter" table — without a populated
/// `name` filter, return `(items=[], total=0)` without executing a query.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Page<Ship>>, ApiError> {
    let filter = ShipFilter {
        name: q.name.filter(|s| !s.trim().is_empty()),
    };
    let (page, page_size) = q.page.resolve(MAX_PAGE_SIZE);
    let (items, total) = ships::list(&state.db, &filter, page, page_size).await?;
    Ok(Json(Page { items, total }))
}

pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ship>, ApiError> {
    ships::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("ship not found".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct ShipInput {
    pub name: String,
}

pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ShipInput>,
) -> Result<Json<Ship>, ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }
    Ok(Json(ships::create(&state.db, &input.name).await?))
}

pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ShipInput>,
) -> Result<Json<Ship>, ApiError> {
    ships::update(&state.db, id, &input.name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("ship not found".to_string()))
}

pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(), ApiError> {
    if ships::delete(&state.db, id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound("ship not found".to_string()))
    }
}
