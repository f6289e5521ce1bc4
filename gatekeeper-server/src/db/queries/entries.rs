use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::event::{UnassignedTagEntry, UnassignedTagEntryView};

/// Record a crossing by a tag with no crew association.
pub async fn create<'c, E>(
    executor: E,
    tag_id: i64,
    shipyard_id: i64,
    is_entering: bool,
) -> sqlx::Result<UnassignedTagEntry>
where
    E: sqlx::PgExecutor<'c>,
{
    sqlx::query_as::<_, UnassignedTagEntry>(
        "INSERT INTO unassigned_tag_entry (tag_id, shipyard_id, is_entering, advertisement_timestamp) \
         VALUES ($1, $2, $3, now()) \
         RETURNING id, tag_id, shipyard_id, is_entering, advertisement_timestamp",
    )
    .bind(tag_id)
    .bind(shipyard_id)
    .bind(is_entering)
    .fetch_one(executor)
    .await
}

/// Export column set: Cantiere, Tag, Battery%, Passaggio, Tipologia.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EntryExportRow {
    pub shipyard_name: String,
    pub tag_mac_address: String,
    pub tag_battery: f64,
    pub advertisement_timestamp: DateTime<Utc>,
    pub is_entering: bool,
}

pub async fn list_for_export(
    pool: &PgPool,
    filter: &EntryFilter,
    max_rows: i64,
) -> sqlx::Result<Vec<EntryExportRow>> {
    let mut builder = sqlx::QueryBuilder::new(
        "SELECT shipyard.name AS shipyard_name, tag.mac_address AS tag_mac_address, \
         tag.remaining_battery AS tag_battery, \
         unassigned_tag_entry.advertisement_timestamp, unassigned_tag_entry.is_entering \
         FROM unassigned_tag_entry \
         JOIN tag ON tag.id = unassigned_tag_entry.tag_id \
         JOIN shipyard ON shipyard.id = unassigned_tag_entry.shipyard_id \
         WHERE 1=1 ",
    );
    push_predicates(&mut builder, filter, "unassigned_tag_entry.");
    builder.push("ORDER BY unassigned_tag_entry.advertisement_timestamp DESC LIMIT ");
    builder.push_bind(max_rows);

    builder.build_query_as::<EntryExportRow>().fetch_all(pool).await
}

#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub tag_id: Option<i64>,
    pub shipyard_id: Option<i64>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Unassigned-entry listing: always executed (not a "requires a
/// filter" table), sorted by advertisement timestamp descending.
pub async fn list(
    pool: &PgPool,
    filter: &EntryFilter,
    page: i64,
    page_size: i64,
) -> sqlx::Result<(Vec<UnassignedTagEntryView>, i64)> {
    let mut items_builder = sqlx::QueryBuilder::new(
        "SELECT unassigned_tag_entry.id, tag.mac_address AS tag_mac_address, \
         shipyard.name AS shipyard_name, unassigned_tag_entry.is_entering, \
         unassigned_tag_entry.advertisement_timestamp \
         FROM unassigned_tag_entry \
         JOIN tag ON tag.id = unassigned_tag_entry.tag_id \
         JOIN shipyard ON shipyard.id = unassigned_tag_entry.shipyard_id \
         WHERE 1=1 ",
    );
    let mut count_builder = sqlx::QueryBuilder::new(
        "SELECT COUNT(*) FROM unassigned_tag_entry WHERE 1=1 ",
    );
    push_predicates(&mut items_builder, filter, "unassigned_tag_entry.");
    push_predicates(&mut count_builder, filter, "");

    items_builder.push("ORDER BY unassigned_tag_entry.advertisement_timestamp DESC LIMIT ");
    items_builder.push_bind(page_size);
    items_builder.push(" OFFSET ");
    items_builder.push_bind((page - 1) * page_size);

    let items = items_builder
        .build_query_as::<UnassignedTagEntryView>()
        .fetch_all(pool)
        .await?;
    let (total,): (i64,) = count_builder.build_query_as().fetch_one(pool).await?;

    Ok((items, total))
}

fn push_predicates<'a>(
    builder: &mut sqlx::QueryBuilder<'a, sqlx::Postgres>,
    filter: &EntryFilter,
    column_prefix: &str,
) {
    if let Some(tag_id) = filter.tag_id {
        builder.push(format!("AND {column_prefix}tag_id = "));
        builder.push_bind(tag_id);
        builder.push(" ");
    }
    if let Some(shipyard_id) = filter.shipyard_id {
        builder.push(format!("AND {column_prefix}shipyard_id = "));
        builder.push_bind(shipyard_id);
        builder.push(" ");
    }
    if let Some(start) = filter.start {
        builder.push(format!("AND {column_prefix}advertisement_timestamp >= "));
        builder.push_bind(start);
        builder.push(" ");
    }
    if let Some(end) = filter.end {
        builder.push(format!("AND {column_prefix}advertisement_timestamp <= "));
        builder.push_bind(end);
        builder.push(" ");
    }
}
