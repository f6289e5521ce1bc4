use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::event::{PermanenceLog, PermanenceLogView};

/// "Most recent open" row: the one with `leave_timestamp IS NULL`
/// having the greatest `entry_timestamp` for this `(crew_member,
/// shipyard)` pair.
pub async fn find_latest_open<'c, E>(
    executor: E,
    crew_member_id: i64,
    shipyard_id: i64,
) -> sqlx::Result<Option<PermanenceLog>>
where
    E: sqlx::PgExecutor<'c>,
{
    sqlx::query_as::<_, PermanenceLog>(
        "SELECT id, crew_member_id, shipyard_id, entry_timestamp, leave_timestamp \
         FROM permanence_log \
         WHERE crew_member_id = $1 AND shipyard_id = $2 AND leave_timestamp IS NULL \
         ORDER BY entry_timestamp DESC LIMIT 1",
    )
    .bind(crew_member_id)
    .bind(shipyard_id)
    .fetch_optional(executor)
    .await
}

pub async fn insert_open<'c, E>(
    executor: E,
    crew_member_id: i64,
    shipyard_id: i64,
) -> sqlx::Result<PermanenceLog>
where
    E: sqlx::PgExecutor<'c>,
{
    sqlx::query_as::<_, PermanenceLog>(
        "INSERT INTO permanence_log (crew_member_id, shipyard_id, entry_timestamp, leave_timestamp) \
         VALUES ($1, $2, now(), NULL) \
         RETURNING id, crew_member_id, shipyard_id, entry_timestamp, leave_timestamp",
    )
    .bind(crew_member_id)
    .bind(shipyard_id)
    .fetch_one(executor)
    .await
}

pub async fn insert_leave_only<'c, E>(
    executor: E,
    crew_member_id: i64,
    shipyard_id: i64,
) -> sqlx::Result<PermanenceLog>
where
    E: sqlx::PgExecutor<'c>,
{
    sqlx::query_as::<_, PermanenceLog>(
        "INSERT INTO permanence_log (crew_member_id, shipyard_id, entry_timestamp, leave_timestamp) \
         VALUES ($1, $2, NULL, now()) \
         RETURNING id, crew_member_id, shipyard_id, entry_timestamp, leave_timestamp",
    )
    .bind(crew_member_id)
    .bind(shipyard_id)
    .fetch_one(executor)
    .await
}

/// Closes the single most recent open row (by id, already resolved by
/// [`find_latest_open`]). Returns `false` if it was no longer open
/// (rowcount 0) by the time this ran, in which case the caller falls
/// back to [`insert_leave_only`].
pub async fn close_by_id<'c, E>(executor: E, id: i64) -> sqlx::Result<bool>
where
    E: sqlx::PgExecutor<'c>,
{
    let result = sqlx::query(
        "UPDATE permanence_log SET leave_timestamp = now() \
         WHERE id = $1 AND leave_timestamp IS NULL",
    )
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Close every currently open row for this pair before a fresh
/// `entering` opens a new one, instead of stacking a second open row
/// (the `close_stale_open_logs` policy).
pub async fn close_all_open<'c, E>(
    executor: E,
    crew_member_id: i64,
    shipyard_id: i64,
) -> sqlx::Result<u64>
where
    E: sqlx::PgExecutor<'c>,
{
    let result = sqlx::query(
        "UPDATE permanence_log SET leave_timestamp = now() \
         WHERE crew_member_id = $1 AND shipyard_id = $2 AND leave_timestamp IS NULL",
    )
    .bind(crew_member_id)
    .bind(shipyard_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Export column set: Cantiere, Tag, Battery%, Barca/Ship, Crew,
/// Role, Entry, Leave.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LogExportRow {
    pub shipyard_name: String,
    pub tag_mac_address: Option<String>,
    pub tag_battery: Option<f64>,
    pub ship_name: Option<String>,
    pub crew_member_name: String,
    pub role_name: Option<String>,
    pub entry_timestamp: Option<DateTime<Utc>>,
    pub leave_timestamp: Option<DateTime<Utc>>,
}

pub async fn list_for_export(
    pool: &PgPool,
    filter: &LogFilter,
    max_rows: i64,
) -> sqlx::Result<Vec<LogExportRow>> {
    let mut builder = sqlx::QueryBuilder::new(
        "SELECT shipyard.name AS shipyard_name, tag.mac_address AS tag_mac_address, \
         tag.remaining_battery AS tag_battery, ship.name AS ship_name, \
         crew_member.name AS crew_member_name, role.name AS role_name, \
         permanence_log.entry_timestamp, permanence_log.leave_timestamp \
         FROM permanence_log \
         JOIN crew_member ON crew_member.id = permanence_log.crew_member_id \
         JOIN shipyard ON shipyard.id = permanence_log.shipyard_id \
         LEFT JOIN ship ON ship.id = crew_member.ship_id \
         LEFT JOIN role ON role.id = crew_member.role_id \
         LEFT JOIN tag ON tag.id = crew_member.tag_id \
         WHERE 1=1 ",
    );
    push_predicates(&mut builder, filter, "permanence_log.");
    builder.push("ORDER BY crew_member.name ASC LIMIT ");
    builder.push_bind(max_rows);

    builder.build_query_as::<LogExportRow>().fetch_all(pool).await
}

#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub crew_member_id: Option<i64>,
    pub shipyard_id: Option<i64>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Permanence-log listing, sorted by crew member name ascending.
/// The date filter selects rows whose `entry_timestamp` OR
/// `leave_timestamp` falls within `[start, end]`.
pub async fn list(
    pool: &PgPool,
    filter: &LogFilter,
    page: i64,
    page_size: i64,
) -> sqlx::Result<(Vec<PermanenceLogView>, i64)> {
    let mut items_builder = sqlx::QueryBuilder::new(
        "SELECT permanence_log.id, crew_member.name AS crew_member_name, \
         shipyard.name AS shipyard_name, permanence_log.entry_timestamp, \
         permanence_log.leave_timestamp \
         FROM permanence_log \
         JOIN crew_member ON crew_member.id = permanence_log.crew_member_id \
         JOIN shipyard ON shipyard.id = permanence_log.shipyard_id \
         WHERE 1=1 ",
    );
    let mut count_builder =
        sqlx::QueryBuilder::new("SELECT COUNT(*) FROM permanence_log WHERE 1=1 ");
    push_predicates(&mut items_builder, filter, "permanence_log.");
    push_predicates(&mut count_builder, filter, "");

    items_builder.push("ORDER BY crew_member.name ASC LIMIT ");
    items_builder.push_bind(page_size);
    items_builder.push(" OFFSET ");
    items_builder.push_bind((page - 1) * page_size);

    let items = items_builder
        .build_query_as::<PermanenceLogView>()
        .fetch_all(pool)
        .await?;
    let (total,): (i64,) = count_builder.build_query_as().fetch_one(pool).await?;

    Ok((items, total))
}

fn push_predicates<'a>(
    builder: &mut sqlx::QueryBuilder<'a, sqlx::Postgres>,
    filter: &LogFilter,
    column_prefix: &str,
) {
    if let Some(crew_member_id) = filter.crew_member_id {
        builder.push(format!("AND {column_prefix}crew_member_id = "));
        builder.push_bind(crew_member_id);
        builder.push(" ");
    }
    if let Some(shipyard_id) = filter.shipyard_id {
        builder.push(format!("AND {column_prefix}shipyard_id = "));
        builder.push_bind(shipyard_id);
        builder.push(" ");
    }
    if let (Some(start), Some(end)) = (filter.start, filter.end) {
        builder.push(format!(
            "AND (({column_prefix}entry_timestamp BETWEEN "
        ));
        builder.push_bind(start);
        builder.push(" AND ");
        builder.push_bind(end);
        builder.push(format!(") OR ({column_prefix}leave_timestamp BETWEEN "));
        builder.push_bind(start);
        builder.push(" AND ");
        builder.push_bind(end);
        builder.push(")) ");
    }
}
