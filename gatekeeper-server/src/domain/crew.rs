use serde::{Deserialize, Serialize};

/// A crew member belongs to at most one ship and one role, and may hold
/// at most one tag (`tag_id` unique when non-null).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    pub ship_id: Option<i64>,
    pub role_id: Option<i64>,
    pub tag_id: Option<i64>,
}

/// Denormalized read shape for the crew query layer: joins in the
/// ship/role names the UI actually renders, rather than forcing the
/// caller to resolve three foreign keys per row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CrewMemberView {
    pub id: i64,
    pub name: String,
    pub ship_name: Option<String>,
    pub role_name: Option<String>,
    pub tag_id: Option<i64>,
}
