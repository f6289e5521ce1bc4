use sqlx::PgPool;

use crate::domain::shipyard::Ship;

#[derive(Debug, Clone, Default)]
pub struct ShipFilter {
    pub name: Option<String>,
}

impl ShipFilter {
    fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

/// Ship listing. Ship is one of the "requires a filter" tables: if no
/// filter field is populated, return empty without issuing a count.
pub async fn list(
    pool: &PgPool,
    filter: &ShipFilter,
    page: i64,
    page_size: i64,
) -> sqlx::Result<(Vec<Ship>, i64)> {
    if filter.is_empty() {
        return Ok((Vec::new(), 0));
    }

    let mut items_builder = sqlx::QueryBuilder::new("SELECT id, name FROM ship WHERE 1=1 ");
    let mut count_builder = sqlx::QueryBuilder::new("SELECT COUNT(*) FROM ship WHERE 1=1 ");
    push_predicates(&mut items_builder, filter);
    push_predicates(&mut count_builder, filter);

    items_builder.push("ORDER BY name ASC LIMIT ");
    items_builder.push_bind(page_size);
    items_builder.push(" OFFSET ");
    items_builder.push_bind((page - 1) * page_size);

    let items = items_builder.build_query_as::<Ship>().fetch_all(pool).await?;
    let (total,): (i64,) = count_builder.build_query_as().fetch_one(pool).await?;

    Ok((items, total))
}

fn push_predicates<'a>(builder: &mut sqlx::QueryBuilder<'a, sqlx::Postgres>, filter: &ShipFilter) {
    if let Some(name) = &filter.name {
        builder.push("AND name ILIKE ");
        builder.push_bind(format!("%{}%", name));
        builder.push(" ");
    }
}

pub async fn get(pool: &PgPool, id: i64) -> sqlx::Result<Option<Ship>> {
    sqlx::query_as::<_, Ship>("SELECT id, name FROM ship WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, name: &str) -> sqlx::Result<Ship> {
    sqlx::query_as::<_, Ship>("INSERT INTO ship (name) VALUES ($1) RETURNING id, name")
        .bind(name)
        .fetch_one(pool)
        .await
}

pub async fn update(pool: &PgPool, id: i64, name: &str) -> sqlx::Result<Option<Ship>> {
    sqlx::query_as::<_, Ship>("UPDATE ship SET name = $1 WHERE id = $2 RETURNING id, name")
        .bind(name)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn delete(pool: &PgPool, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM ship WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
