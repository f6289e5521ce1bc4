pub mod auth;
pub mod beacons;
pub mod crew;
pub mod entries;
pub mod export;
pub mod ingest;
pub mod logs;
pub mod roles;
pub mod shipyards;
pub mod ships;
pub mod tags;
