use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::api::auth::AuthUser;
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::db::queries::beacons;
use crate::domain::shipyard::ActivatorBeacon;

pub async fn list_for_shipyard(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(shipyard_id): Path<i64>,
) -> Result<Json<Vec<ActivatorBeacon>>, ApiError> {
    let rows = beacons::list_for_shipyard(&state.db, shipyard_id).await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct BeaconInput {
    pub friendly_number: i32,
    pub is_first_when_entering: bool,
}

/// `friendly_number` is unique within a `shipyard_id` — the store
/// surfaces a violation as [`ApiError::Conflict`].
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(shipyard_id): Path<i64>,
    Json(input): Json<BeaconInput>,
) -> Result<Json<ActivatorBeacon>, ApiError> {
    let row = beacons::create(
        &state.db,
        input.friendly_number,
        shipyard_id,
        input.is_first_when_entering,
    )
    .await?;
    Ok(Json(row))
}

pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path((_shipyard_id, id)): Path<(i64, i64)>,
) -> Result<(), ApiError> {
    if beacons::delete(&state.db, id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound("activator beacon not found".to_string()))
    }
}
