use gatekeeper_protocol::error::DropReason;
use sqlx::{Postgres, Transaction};

use crate::config::AppConfig;
use crate::db::queries::{beacons, crew, tags};
use crate::domain::direction::{self, Direction, RejectReason};
use crate::engine::recorder;
use crate::engine::registry;

/// Why a device entry produced no durable record. Never surfaced to
/// the gateway — ingestion is best-effort; callers fold these into a
/// per-reason counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropDetail {
    Decode(DropReason),
    /// The core never auto-registers tags.
    UnknownTag,
    /// Unknown activator friendly number.
    UnknownActivator,
    /// The previously-paired beacon was deleted out from under us.
    PreviousBeaconDeleted,
    Rejected(RejectReason),
    Duplicate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    UnassignedTag,
    Permanence,
}

/// Outcome of processing one device entry, for logging/metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceOutcome {
    Dropped(DropDetail),
    /// Telemetry/pairing updated, no event: first-ever packet from the
    /// tag, or this packet only establishes a fresh pair.
    NoEvent,
    EventEmitted {
        direction: Direction,
        target: EventTarget,
    },
}

/// Decodes and records one device entry, run inside the caller's
/// per-device transaction. Every branch that can write to the database
/// does so through `tx`; the caller commits or rolls back around this
/// call.
pub async fn process_device(
    tx: &mut Transaction<'_, Postgres>,
    config: &AppConfig,
    hex_data: &str,
) -> sqlx::Result<DeviceOutcome> {
    let frame = match gatekeeper_protocol::decode(hex_data) {
        Ok(frame) => frame,
        Err(reason) => return Ok(DeviceOutcome::Dropped(DropDetail::Decode(reason))),
    };

    let tag = match tags::lookup_by_mac(&mut **tx, &frame.mac_address).await? {
        Some(tag) => tag,
        None => return Ok(DeviceOutcome::Dropped(DropDetail::UnknownTag)),
    };

    let current_beacon =
        beacons::find_by_friendly_number(&mut **tx, frame.activator_friendly_number as i32)
            .await?;

    let battery = registry::battery_percent(frame.battery_mv, config.battery_max_millivolts);

    let telemetry = tags::update_telemetry(
        &mut **tx,
        tag.id,
        battery,
        frame.packet_counter as i32,
        current_beacon.as_ref().map(|b| b.id),
    )
    .await?;

    let telemetry = match telemetry {
        Some(t) => t,
        None => return Ok(DeviceOutcome::Dropped(DropDetail::UnknownTag)),
    };

    if telemetry.is_duplicate() {
        return Ok(DeviceOutcome::Dropped(DropDetail::Duplicate));
    }
    if telemetry.is_first_ever() {
        return Ok(DeviceOutcome::NoEvent);
    }
    let previous_beacon_id = match telemetry.old_previous_echobeacon {
        Some(id) => id,
        None => return Ok(DeviceOutcome::NoEvent),
    };

    let current_beacon = match current_beacon {
        Some(beacon) => beacon,
        None => return Ok(DeviceOutcome::Dropped(DropDetail::UnknownActivator)),
    };

    let previous_beacon = match beacons::get(&mut **tx, previous_beacon_id).await? {
        Some(beacon) => beacon,
        None => return Ok(DeviceOutcome::Dropped(DropDetail::PreviousBeaconDeleted)),
    };

    let direction = match direction::resolve(&previous_beacon, &current_beacon) {
        Ok(direction) => direction,
        Err(reason) => return Ok(DeviceOutcome::Dropped(DropDetail::Rejected(reason))),
    };

    let crew_member = crew::find_by_tag(&mut **tx, tag.id).await?;
    let target = if crew_member.is_some() {
        EventTarget::Permanence
    } else {
        EventTarget::UnassignedTag
    };

    recorder::record_event(
        &mut **tx,
        config.close_stale_open_logs,
        crew_member.map(|c| c.id),
        tag.id,
        current_beacon.shipyard_id,
        direction,
    )
    .await?;

    // Pairing resets only once an event has actually been
    // emitted, so the next packet must establish a fresh pair.
    tags::clear_pairing(&mut **tx, tag.id).await?;

    Ok(DeviceOutcome::EventEmitted { direction, target })
}
