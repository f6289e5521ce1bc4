use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::api::state::AppState;
use crate::config::FlaskEnv;
use crate::engine::{process_device, DeviceOutcome};
use crate::engine::pipeline::EventTarget;

const INVALID_MESSAGE: &str = "Invalid gateway message";
const PROCESSED: &str = "Processed";

#[derive(Debug, Deserialize)]
pub struct GatewayDevice {
    pub data: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub scan_time: Value,
}

#[derive(Debug, Deserialize)]
pub struct GatewayValue {
    pub device_list: Vec<GatewayDevice>,
}

#[derive(Debug, Deserialize)]
pub struct GatewayData {
    pub value: GatewayValue,
}

#[derive(Debug, Deserialize)]
pub struct GatewayEnvelope {
    pub data: GatewayData,
}

/// `POST /gateway-endpoint`. Validates the three nesting levels of
/// the envelope and, for each device, decodes and records the event
/// under its own transaction. The response is a fixed success string
/// regardless of how many devices produced events or were dropped —
/// ingestion is best-effort and never surfaces per-device failures to
/// the gateway.
pub async fn ingest(
    State(state): State<AppState>,
    body: axum::body::Bytes,
) -> (StatusCode, &'static str) {
    let envelope: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => return (StatusCode::BAD_REQUEST, INVALID_MESSAGE),
    };

    if state.config.flask_env == FlaskEnv::Json {
        info!(envelope = %serde_json::to_string_pretty(&envelope).unwrap_or_default(), "json-mode ingest");
        return (StatusCode::OK, PROCESSED);
    }

    let envelope: GatewayEnvelope = match serde_json::from_value(envelope) {
        Ok(envelope) => envelope,
        Err(_) => return (StatusCode::BAD_REQUEST, INVALID_MESSAGE),
    };

    let mut emitted = 0usize;
    let mut dropped = 0usize;
    let mut no_event = 0usize;

    for device in envelope.data.value.device_list {
        let Some(hex_data) = device.data else {
            dropped += 1;
            continue;
        };

        match process_one_device(&state, &hex_data).await {
            Ok(DeviceOutcome::EventEmitted { direction, target }) => {
                emitted += 1;
                info!(?direction, target = ?event_target_label(target), "presence event recorded");
            }
            Ok(DeviceOutcome::NoEvent) => no_event += 1,
            Ok(DeviceOutcome::Dropped(reason)) => {
                dropped += 1;
                warn!(?reason, "device entry dropped");
            }
            Err(e) => {
                dropped += 1;
                warn!(error = %e, "device transaction failed, skipping");
            }
        }
    }

    info!(emitted, no_event, dropped, "gateway batch processed");
    (StatusCode::OK, PROCESSED)
}

fn event_target_label(target: EventTarget) -> &'static str {
    match target {
        EventTarget::UnassignedTag => "unassigned_tag_entry",
        EventTarget::Permanence => "permanence_log",
    }
}

/// Opens and commits one transaction per device — never holds a
/// connection across devices within a request.
async fn process_one_device(state: &AppState, hex_data: &str) -> anyhow::Result<DeviceOutcome> {
    let mut tx = state.db.begin().await?;
    let outcome = process_device(&mut tx, &state.config, hex_data).await?;
    tx.commit().await?;
    Ok(outcome)
}
