use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::auth::AuthUser;
use crate::api::error::ApiError;
use crate::api::pagination::{Page, PageQuery, MAX_PAGE_SIZE};
use crate::api::state::AppState;
use crate::api::timefmt::parse_form_timestamp;
use crate::db::queries::logs::{self, LogFilter};
use crate::domain::event::PermanenceLogView;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub crew_member_id: Option<i64>,
    pub shipyard_id: Option<i64>,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(flatten)]
    pub page: PageQuery,
}

/// The date filter selects rows whose `entry_timestamp` OR
/// `leave_timestamp` falls within `[start, end]`, sorted by crew member
/// name ascending.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Page<PermanenceLogView>>, ApiError> {
    let filter = LogFilter {
        crew_member_id: q.crew_member_id,
        shipyard_id: q.shipyard_id,
        start: q.start.as_deref().and_then(parse_form_timestamp),
        end: q.end.as_deref().and_then(parse_form_timestamp),
    };
    let (page, page_size) = q.page.resolve(MAX_PAGE_SIZE);
    let (items, total) = logs::list(&state.db, &filter, page, page_size).await?;
    Ok(Json(Page { items, total }))
}
