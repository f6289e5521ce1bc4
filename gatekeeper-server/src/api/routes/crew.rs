use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::auth::AuthUser;
use crate::api::error::ApiError;
use crate::api::pagination::{Page, PageQuery, MAX_PAGE_SIZE};
use crate::api::state::AppState;
use crate::db::queries::crew::{self, CrewFilter};
use crate::domain::crew::{CrewMember, CrewMemberView};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
    pub ship_id: Option<i64>,
    pub role_id: Option<i64>,
    #[serde(flatten)]
    pub page: PageQuery,
}

pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Page<CrewMemberView>>, ApiError> {
    let filter = CrewFilter {
        name: q.name.filter(|s| !s.trim().is_empty()),
        ship_id: q.ship_id,
        role_id: q.role_id,
    };
    let (page, page_size) = q.page.resolve(MAX_PAGE_SIZE);
    let (items, total) = crew::list(&state.db, &filter, page, page_size).await?;
    Ok(Json(Page { items, total }))
}

pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CrewMember>, ApiError> {
    crew::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("crew member not found".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct CrewInput {
    pub name: String,
    pub ship_id: Option<i64>,
    pub role_id: Option<i64>,
    pub tag_id: Option<i64>,
}

/// Assigning a tag already held by another crew member fails
/// atomically via the store's unique constraint, surfaced as
/// [`ApiError::Conflict`] by [`crate::api::error::ApiError`]'s
/// `sqlx::Error` conversion.
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CrewInput>,
) -> Result<Json<CrewMember>, ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }
    let row = crew::create(&state.db, &input.name, input.ship_id, input.role_id, input.tag_id)
        .await?;
    Ok(Json(row))
}

pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<CrewInput>,
) -> Result<Json<CrewMember>, ApiError> {
    crew::update(&state.db, id, &input.name, input.ship_id, input.role_id, input.tag_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("crew member not found".to_string()))
}

pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(), ApiError> {
    if crew::delete(&state.db, id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound("crew member not found".to_string()))
    }
}
