use sqlx::PgPool;

use crate::domain::crew::{CrewMember, CrewMemberView};

#[derive(Debug, Clone, Default)]
pub struct CrewFilter {
    pub name: Option<String>,
    pub ship_id: Option<i64>,
    pub role_id: Option<i64>,
}

impl CrewFilter {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.ship_id.is_none() && self.role_id.is_none()
    }
}

pub async fn get(pool: &PgPool, id: i64) -> sqlx::Result<Option<CrewMember>> {
    sqlx::query_as::<_, CrewMember>(
        "SELECT id, name, ship_id, role_id, tag_id FROM crew_member WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_tag<'c, E>(executor: E, tag_id: i64) -> sqlx::Result<Option<CrewMember>>
where
    E: sqlx::PgExecutor<'c>,
{
    sqlx::query_as::<_, CrewMember>(
        "SELECT id, name, ship_id, role_id, tag_id FROM crew_member WHERE tag_id = $1",
    )
    .bind(tag_id)
    .fetch_optional(executor)
    .await
}

pub async fn create(
    pool: &PgPool,
    name: &str,
    ship_id: Option<i64>,
    role_id: Option<i64>,
    tag_id: Option<i64>,
) -> sqlx::Result<CrewMember> {
    sqlx::query_as::<_, CrewMember>(
        "INSERT INTO crew_member (name, ship_id, role_id, tag_id) VALUES ($1, $2, $3, $4) \
         RETURNING id, name, ship_id, role_id, tag_id",
    )
    .bind(name)
    .bind(ship_id)
    .bind(role_id)
    .bind(tag_id)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    name: &str,
    ship_id: Option<i64>,
    role_id: Option<i64>,
    tag_id: Option<i64>,
) -> sqlx::Result<Option<CrewMember>> {
    sqlx::query_as::<_, CrewMember>(
        "UPDATE crew_member SET name = $1, ship_id = $2, role_id = $3, tag_id = $4 \
         WHERE id = $5 RETURNING id, name, ship_id, role_id, tag_id",
    )
    .bind(name)
    .bind(ship_id)
    .bind(role_id)
    .bind(tag_id)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM crew_member WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Crew listing. Crew is one of the "requires a filter" tables:
/// if no filter field is populated, return empty without issuing a
/// count query.
pub async fn list(
    pool: &PgPool,
    filter: &CrewFilter,
    page: i64,
    page_size: i64,
) -> sqlx::Result<(Vec<CrewMemberView>, i64)> {
    if filter.is_empty() {
        return Ok((Vec::new(), 0));
    }

    let select = "SELECT crew_member.id, crew_member.name, ship.name AS ship_name, \
                  role.name AS role_name, crew_member.tag_id \
                  FROM crew_member \
                  LEFT JOIN ship ON ship.id = crew_member.ship_id \
                  LEFT JOIN role ON role.id = crew_member.role_id \
                  WHERE 1=1 ";
    let count_select = "SELECT COUNT(*) FROM crew_member WHERE 1=1 ";

    let mut items_builder = sqlx::QueryBuilder::new(select);
    let mut count_builder = sqlx::QueryBuilder::new(count_select);
    push_predicates(&mut items_builder, filter, "crew_member.");
    push_predicates(&mut count_builder, filter, "");

    items_builder.push("ORDER BY crew_member.name ASC LIMIT ");
    items_builder.push_bind(page_size);
    items_builder.push(" OFFSET ");
    items_builder.push_bind((page - 1) * page_size);

    let items = items_builder
        .build_query_as::<CrewMemberView>()
        .fetch_all(pool)
        .await?;
    let (total,): (i64,) = count_builder.build_query_as().fetch_one(pool).await?;

    Ok((items, total))
}

fn push_predicates<'a>(
    builder: &mut sqlx::QueryBuilder<'a, sqlx::Postgres>,
    filter: &CrewFilter,
    column_prefix: &str,
) {
    if let Some(name) = &filter.name {
        builder.push(format!("AND {column_prefix}name ILIKE "));
        builder.push_bind(format!("%{}%", name));
        builder.push(" ");
    }
    if let Some(ship_id) = filter.ship_id {
        builder.push(format!("AND {column_prefix}ship_id = "));
        builder.push_bind(ship_id);
        builder.push(" ");
    }
    if let Some(role_id) = filter.role_id {
        builder.push(format!("AND {column_prefix}role_id = "));
        builder.push_bind(role_id);
        builder.push(" ");
    }
}
