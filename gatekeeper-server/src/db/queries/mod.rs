pub mod beacons;
pub mod crew;
pub mod entries;
pub mod logs;
pub mod roles;
pub mod ships;
pub mod shipyards;
pub mod tags;
pub mod users;
