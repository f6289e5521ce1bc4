use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A crossing by a tag not linked to any crew member, recorded for
/// audit.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UnassignedTagEntry {
    pub id: i64,
    pub tag_id: i64,
    pub shipyard_id: i64,
    pub is_entering: bool,
    pub advertisement_timestamp: DateTime<Utc>,
}

/// A time interval a crew member spent in a shipyard. Open = entry
/// recorded, leave pending (`leave_timestamp IS NULL`).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PermanenceLog {
    pub id: i64,
    pub crew_member_id: i64,
    pub shipyard_id: i64,
    pub entry_timestamp: Option<DateTime<Utc>>,
    pub leave_timestamp: Option<DateTime<Utc>>,
}

/// Denormalized read shape joining in the crew member's name (the
/// logs endpoint sorts permanence logs by crew member name).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PermanenceLogView {
    pub id: i64,
    pub crew_member_name: String,
    pub shipyard_name: String,
    pub entry_timestamp: Option<DateTime<Utc>>,
    pub leave_timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UnassignedTagEntryView {
    pub id: i64,
    pub tag_mac_address: String,
    pub shipyard_name: String,
    pub is_entering: bool,
    pub advertisement_timestamp: DateTime<Utc>,
}
