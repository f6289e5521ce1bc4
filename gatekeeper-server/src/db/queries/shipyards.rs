use sqlx::PgPool;

use crate::domain::shipyard::Shipyard;

pub async fn list(pool: &PgPool, name_filter: Option<&str>) -> sqlx::Result<Vec<Shipyard>> {
    match name_filter {
        Some(term) => {
            let pattern = format!("%{}%", term);
            sqlx::query_as::<_, Shipyard>(
                "SELECT id, name FROM shipyard WHERE name ILIKE $1 ORDER BY name",
            )
            .bind(pattern)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Shipyard>("SELECT id, name FROM shipyard ORDER BY name")
                .fetch_all(pool)
                .await
        }
    }
}

pub async fn get(pool: &PgPool, id: i64) -> sqlx::Result<Option<Shipyard>> {
    sqlx::query_as::<_, Shipyard>("SELECT id, name FROM shipyard WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, name: &str) -> sqlx::Result<Shipyard> {
    sqlx::query_as::<_, Shipyard>(
        "INSERT INTO shipyard (name) VALUES ($1) RETURNING id, name",
    )
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, id: i64, name: &str) -> sqlx::Result<Option<Shipyard>> {
    sqlx::query_as::<_, Shipyard>(
        "UPDATE shipyard SET name = $1 WHERE id = $2 RETURNING id, name",
    )
    .bind(name)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM shipyard WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
