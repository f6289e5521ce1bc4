use sqlx::PgPool;

use crate::domain::shipyard::ActivatorBeacon;

pub async fn list_for_shipyard(pool: &PgPool, shipyard_id: i64) -> sqlx::Result<Vec<ActivatorBeacon>> {
    sqlx::query_as::<_, ActivatorBeacon>(
        "SELECT id, friendly_number, shipyard_id, is_first_when_entering \
         FROM activator_beacon WHERE shipyard_id = $1 ORDER BY friendly_number",
    )
    .bind(shipyard_id)
    .fetch_all(pool)
    .await
}

pub async fn get<'c, E>(executor: E, id: i64) -> sqlx::Result<Option<ActivatorBeacon>>
where
    E: sqlx::PgExecutor<'c>,
{
    sqlx::query_as::<_, ActivatorBeacon>(
        "SELECT id, friendly_number, shipyard_id, is_first_when_entering \
         FROM activator_beacon WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Activator lookup for an incoming packet: the wire format only
/// carries `friendly_number`, not `shipyard_id`, so this resolves
/// across the whole table. `friendly_number` is only guaranteed unique
/// *within* a shipyard; if the same number is reused by more than
/// one yard, the first match is taken (deployments are expected to run
/// one shipyard per friendly-number range). A result of `None` is the
/// "unknown activator" drop case.
pub async fn find_by_friendly_number<'c, E>(
    executor: E,
    friendly_number: i32,
) -> sqlx::Result<Option<ActivatorBeacon>>
where
    E: sqlx::PgExecutor<'c>,
{
    sqlx::query_as::<_, ActivatorBeacon>(
        "SELECT id, friendly_number, shipyard_id, is_first_when_entering \
         FROM activator_beacon WHERE friendly_number = $1 LIMIT 1",
    )
    .bind(friendly_number)
    .fetch_optional(executor)
    .await
}

pub async fn create(
    pool: &PgPool,
    friendly_number: i32,
    shipyard_id: i64,
    is_first_when_entering: bool,
) -> sqlx::Result<ActivatorBeacon> {
    sqlx::query_as::<_, ActivatorBeacon>(
        "INSERT INTO activator_beacon (friendly_number, shipyard_id, is_first_when_entering) \
         VALUES ($1, $2, $3) \
         RETURNING id, friendly_number, shipyard_id, is_first_when_entering",
    )
    .bind(friendly_number)
    .bind(shipyard_id)
    .bind(is_first_when_entering)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM activator_beacon WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
