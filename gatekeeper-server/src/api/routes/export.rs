use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::api::auth::AuthUser;
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::timefmt::parse_form_timestamp;
use crate::db::queries::entries::{self, EntryFilter};
use crate::db::queries::logs::{self, LogFilter};
use crate::export;

/// Export reads use the bulk page size (10,000), not the API's
/// 100-row cap.
const EXPORT_MAX_ROWS: i64 = crate::api::pagination::MAX_EXPORT_PAGE_SIZE;

#[derive(Debug, Deserialize)]
pub struct LogExportQuery {
    pub crew_member_id: Option<i64>,
    pub shipyard_id: Option<i64>,
    pub start: Option<String>,
    pub end: Option<String>,
}

pub async fn permanence_logs(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(q): Query<LogExportQuery>,
) -> Result<Response, ApiError> {
    let filter = LogFilter {
        crew_member_id: q.crew_member_id,
        shipyard_id: q.shipyard_id,
        start: q.start.as_deref().and_then(parse_form_timestamp),
        end: q.end.as_deref().and_then(parse_form_timestamp),
    };
    let rows = logs::list_for_export(&state.db, &filter, EXPORT_MAX_ROWS).await?;
    let workbook = export::permanence_logs_workbook(&rows)
        .map_err(|e| ApiError::Internal(format!("failed to build export: {e}")))?;
    Ok(xlsx_response(workbook, "permanence_log.xlsx"))
}

#[derive(Debug, Deserialize)]
pub struct EntryExportQuery {
    pub tag_id: Option<i64>,
    pub shipyard_id: Option<i64>,
    pub start: Option<String>,
    pub end: Option<String>,
}

pub async fn unassigned_entries(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(q): Query<EntryExportQuery>,
) -> Result<Response, ApiError> {
    let filter = EntryFilter {
        tag_id: q.tag_id,
        shipyard_id: q.shipyard_id,
        start: q.start.as_deref().and_then(parse_form_timestamp),
        end: q.end.as_deref().and_then(parse_form_timestamp),
    };
    let rows = entries::list_for_export(&state.db, &filter, EXPORT_MAX_ROWS).await?;
    let workbook = export::unassigned_entries_workbook(&rows)
        .map_err(|e| ApiError::Internal(format!("failed to build export: {e}")))?;
    Ok(xlsx_response(workbook, "unassigned_tag_entry.xlsx"))
}

fn xlsx_response(body: Vec<u8>, filename: &str) -> Response {
    (
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}
