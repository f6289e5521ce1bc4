use sqlx::PgPool;

use crate::domain::tag::{Tag, TagView};

#[derive(Debug, Clone)]
pub struct TelemetryUpdate {
    pub tag_id: i64,
    /// Packet counter stored before this update, `None` if this is the
    /// tag's first-ever observed packet.
    pub old_packet_counter: Option<i32>,
    /// Pairing beacon stored before this update; `None` means the
    /// *next* packet must establish pairing without producing an event.
    pub old_previous_echobeacon: Option<i64>,
    pub incoming_packet_counter: i32,
}

impl TelemetryUpdate {
    /// Equal consecutive packet counters mark a duplicate retransmit.
    pub fn is_duplicate(&self) -> bool {
        self.old_packet_counter == Some(self.incoming_packet_counter)
    }

    /// A `None` stored counter means this is the first packet ever
    /// seen from the tag; no event can be emitted because there is no
    /// prior activator to pair against.
    pub fn is_first_ever(&self) -> bool {
        self.old_packet_counter.is_none()
    }
}

pub async fn lookup_by_mac<'c, E>(executor: E, mac_address: &str) -> sqlx::Result<Option<Tag>>
where
    E: sqlx::PgExecutor<'c>,
{
    sqlx::query_as::<_, Tag>(
        "SELECT id, mac_address, remaining_battery, packet_counter, previous_echobeacon \
         FROM tag WHERE mac_address = $1",
    )
    .bind(mac_address)
    .fetch_optional(executor)
    .await
}

pub async fn get(pool: &PgPool, id: i64) -> sqlx::Result<Option<Tag>> {
    sqlx::query_as::<_, Tag>(
        "SELECT id, mac_address, remaining_battery, packet_counter, previous_echobeacon \
         FROM tag WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// `update_telemetry`: one atomic statement that both decides
/// whether the incoming counter is a duplicate and, if not, advances
/// `packet_counter`/`previous_echobeacon` together — so the decision
/// and the pairing write can never observe each other's half-applied
/// state under concurrent access. The `RETURNING` clause surfaces the
/// pre-update values via
/// a CTE so the caller can classify the event without a second
/// round-trip.
pub async fn update_telemetry<'c, E>(
    executor: E,
    tag_id: i64,
    remaining_battery: f64,
    incoming_packet_counter: i32,
    current_activator_id: Option<i64>,
) -> sqlx::Result<Option<TelemetryUpdate>>
where
    E: sqlx::PgExecutor<'c>,
{
    let row = sqlx::query_as::<_, (Option<i32>, Option<i64>)>(
        "WITH previous AS ( \
            SELECT packet_counter, previous_echobeacon FROM tag WHERE id = $1 \
         ) \
         UPDATE tag SET \
            remaining_battery = $2, \
            packet_counter = CASE \
                WHEN previous.packet_counter IS NULL OR previous.packet_counter <> $3 \
                THEN $3 ELSE previous.packet_counter END, \
            previous_echobeacon = CASE \
                WHEN previous.packet_counter IS NULL OR previous.packet_counter <> $3 \
                THEN $4 ELSE previous.previous_echobeacon END \
         FROM previous \
         WHERE tag.id = $1 \
         RETURNING previous.packet_counter, previous.previous_echobeacon",
    )
    .bind(tag_id)
    .bind(remaining_battery)
    .bind(incoming_packet_counter)
    .bind(current_activator_id)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(|(old_packet_counter, old_previous_echobeacon)| TelemetryUpdate {
        tag_id,
        old_packet_counter,
        old_previous_echobeacon,
        incoming_packet_counter,
    }))
}

/// `clear_pairing`: called once an event has been emitted so the
/// next packet must establish a fresh pair before another event fires.
pub async fn clear_pairing<'c, E>(executor: E, tag_id: i64) -> sqlx::Result<()>
where
    E: sqlx::PgExecutor<'c>,
{
    sqlx::query("UPDATE tag SET previous_echobeacon = NULL WHERE id = $1")
        .bind(tag_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn create(pool: &PgPool, mac_address: &str) -> sqlx::Result<Tag> {
    sqlx::query_as::<_, Tag>(
        "INSERT INTO tag (mac_address, remaining_battery, packet_counter, previous_echobeacon) \
         VALUES ($1, 0, NULL, NULL) \
         RETURNING id, mac_address, remaining_battery, packet_counter, previous_echobeacon",
    )
    .bind(mac_address)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM tag WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Filtered/paginated tag listing. `assigned`/`vacant` gate which
/// association states are included; when both are `false` the result
/// is empty without a query.
pub async fn list(
    pool: &PgPool,
    assigned: bool,
    vacant: bool,
    page: i64,
    page_size: i64,
) -> sqlx::Result<(Vec<TagView>, i64)> {
    if !assigned && !vacant {
        return Ok((Vec::new(), 0));
    }

    let mut builder = sqlx::QueryBuilder::new(
        "SELECT tag.id, tag.mac_address, tag.remaining_battery, crew_member.name AS assigned_to \
         FROM tag LEFT JOIN crew_member ON crew_member.tag_id = tag.id WHERE 1=1 ",
    );
    if assigned && !vacant {
        builder.push("AND crew_member.id IS NOT NULL ");
    } else if vacant && !assigned {
        builder.push("AND crew_member.id IS NULL ");
    }

    let total = count_total(pool, assigned, vacant).await?;

    builder.push("ORDER BY tag.remaining_battery ASC LIMIT ");
    builder.push_bind(page_size);
    builder.push(" OFFSET ");
    builder.push_bind((page - 1) * page_size);

    let items = builder
        .build_query_as::<TagView>()
        .fetch_all(pool)
        .await?;

    Ok((items, total))
}

async fn count_total(pool: &PgPool, assigned: bool, vacant: bool) -> sqlx::Result<i64> {
    let mut builder = sqlx::QueryBuilder::new(
        "SELECT COUNT(*) FROM tag LEFT JOIN crew_member ON crew_member.tag_id = tag.id WHERE 1=1 ",
    );
    if assigned && !vacant {
        builder.push("AND crew_member.id IS NOT NULL ");
    } else if vacant && !assigned {
        builder.push("AND crew_member.id IS NULL ");
    }
    let (count,): (i64,) = builder.build_query_as().fetch_one(pool).await?;
    Ok(count)
}
