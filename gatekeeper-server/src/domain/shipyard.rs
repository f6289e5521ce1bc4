use serde::{Deserialize, Serialize};

/// A gated physical area monitored by one or more pairs of activator
/// beacons, one pair per gate.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Shipyard {
    pub id: i64,
    pub name: String,
}

/// A fixed radio installation at a shipyard gate. Each gate has exactly
/// two beacons; the one crossed first by someone entering carries
/// `is_first_when_entering = true`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivatorBeacon {
    pub id: i64,
    pub friendly_number: i32,
    pub shipyard_id: i64,
    pub is_first_when_entering: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ship {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    pub id: i64,
    pub name: String,
}
