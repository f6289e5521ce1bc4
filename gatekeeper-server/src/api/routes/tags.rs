use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::auth::AuthUser;
use crate::api::error::ApiError;
use crate::api::pagination::{Page, PageQuery, MAX_PAGE_SIZE};
use crate::api::state::AppState;
use crate::db::queries::tags;
use crate::domain::tag::{Tag, TagView};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub assigned: bool,
    #[serde(default)]
    pub vacant: bool,
    #[serde(flatten)]
    pub page: PageQuery,
}

/// Tags additionally require at least one of `assigned | vacant`;
/// when both are off the result is empty.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Page<TagView>>, ApiError> {
    let (page, page_size) = q.page.resolve(MAX_PAGE_SIZE);
    let (items, total) = tags::list(&state.db, q.assigned, q.vacant, page, page_size).await?;
    Ok(Json(Page { items, total }))
}

pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Tag>, ApiError> {
    tags::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("tag not found".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct TagInput {
    pub mac_address: String,
}

pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<TagInput>,
) -> Result<Json<Tag>, ApiError> {
    if input.mac_address.trim().is_empty() {
        return Err(ApiError::BadRequest("mac_address is required".to_string()));
    }
    Ok(Json(tags::create(&state.db, &input.mac_address).await?))
}

/// Deleting a tag clears `crew_member.tag_id` (ON DELETE SET NULL),
/// enforced by the schema rather than application code.
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(), ApiError> {
    if tags::delete(&state.db, id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound("tag not found".to_string()))
    }
}
