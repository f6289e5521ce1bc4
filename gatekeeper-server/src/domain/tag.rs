use serde::{Deserialize, Serialize};

/// Mobile beacon carried by a worker. `previous_echobeacon` is null
/// exactly when the next packet from this tag must establish pairing
/// without producing an event.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub mac_address: String,
    pub remaining_battery: f64,
    pub packet_counter: Option<i32>,
    pub previous_echobeacon: Option<i64>,
}

/// Denormalized read shape for the tag query layer, including
/// whether the tag is currently assigned to a crew member.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TagView {
    pub id: i64,
    pub mac_address: String,
    pub remaining_battery: f64,
    pub assigned_to: Option<String>,
}
