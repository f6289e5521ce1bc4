use crate::error::DropReason;
use crate::fields::{offsets, HEADER_HEX_LEN, MIN_PAYLOAD_HEX_LEN, PRESENCE_MESSAGE_TYPE, TLM_FLAG_BIT};
use serde::{Deserialize, Serialize};

/// A decoded presence-scan frame: the typed fields extracted from one
/// device entry's hex payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedFrame {
    /// Over-the-air identifier of the activator beacon that produced the scan.
    pub activator_friendly_number: u16,
    /// Rolling single-byte packet counter carried by the tag.
    pub packet_counter: u8,
    /// Canonical hex MAC address of the scanned tag, case preserved.
    pub mac_address: String,
    /// Received signal strength, already converted to dBm. Informational only.
    pub rssi_dbm: i16,
    /// Battery voltage in millivolts.
    pub battery_mv: u16,
}

/// Decode one device entry's `data` hex string into a [`DecodedFrame`],
/// or the reason it was dropped.
///
/// The first [`HEADER_HEX_LEN`] hex characters are a gateway-level
/// header and are discarded unconditionally; see `fields` for the wire
/// layout of what follows.
pub fn decode(hex_data: &str) -> Result<DecodedFrame, DropReason> {
    let data = hex_data.trim();
    if data.is_empty() {
        return Err(DropReason::MissingData);
    }
    if data.len() < HEADER_HEX_LEN {
        return Err(DropReason::TooShort);
    }

    let payload = &data[HEADER_HEX_LEN..];
    if payload.len() < MIN_PAYLOAD_HEX_LEN {
        return Err(DropReason::TooShort);
    }
    if !payload.is_char_boundary(MIN_PAYLOAD_HEX_LEN)
        || !payload[..MIN_PAYLOAD_HEX_LEN].chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(DropReason::MalformedHex);
    }

    let message_type = &payload[offsets::MESSAGE_TYPE];
    if message_type != PRESENCE_MESSAGE_TYPE {
        return Err(DropReason::WrongMessageType);
    }

    let activator_bytes = hex_bytes(&payload[offsets::ACTIVATOR_NUMBER])?;
    let activator_friendly_number = u16::from_be_bytes([activator_bytes[0], activator_bytes[1]]);

    let packet_counter = hex_bytes(&payload[offsets::PACKET_COUNTER])?[0];

    let mac_address = payload[offsets::MAC_ADDRESS].to_string();

    let rssi_raw = hex_bytes(&payload[offsets::RSSI])?[0];
    let rssi_dbm = rssi_raw as i16 - 256;

    let flags = hex_bytes(&payload[offsets::PAYLOAD_FLAGS])?[0];
    if flags & TLM_FLAG_BIT == 0 {
        return Err(DropReason::MissingTlmFlag);
    }

    let battery_bytes = hex_bytes(&payload[offsets::BATTERY_MV])?;
    let battery_mv = u16::from_be_bytes([battery_bytes[0], battery_bytes[1]]);

    Ok(DecodedFrame {
        activator_friendly_number,
        packet_counter,
        mac_address,
        rssi_dbm,
        battery_mv,
    })
}

fn hex_bytes(s: &str) -> Result<Vec<u8>, DropReason> {
    hex::decode(s).map_err(|_| DropReason::MalformedHex)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 16-char header, then: activator=0001, type=03, counter=05,
    // mac=AABBCCDDEEFF, rssi=C8 (200 -> -56 dBm), flags=04, battery=0E10 (3600 mV)
    const VALID_FRAME: &str = "0000000000000000" // header
        "0001" // activator friendly number
        "03" // message type
        "05" // packet counter
        "AABBCCDDEEFF" // mac
        "C8" // rssi
        "04" // flags (TLM bit set)
        "0E10"; // battery mv

    #[test]
    fn decodes_a_valid_presence_frame() {
        let frame = decode(VALID_FRAME).expect("should decode");
        assert_eq!(frame.activator_friendly_number, 1);
        assert_eq!(frame.packet_counter, 5);
        assert_eq!(frame.mac_address, "AABBCCDDEEFF");
        assert_eq!(frame.rssi_dbm, -56);
        assert_eq!(frame.battery_mv, 0x0E10);
    }

    #[test]
    fn rejects_short_payload() {
        assert_eq!(decode("0000000000000000000103"), Err(DropReason::TooShort));
    }

    #[test]
    fn rejects_empty_data() {
        assert_eq!(decode(""), Err(DropReason::MissingData));
    }

    #[test]
    fn rejects_wrong_message_type() {
        let frame = VALID_FRAME.replacen("03", "99", 1);
        assert_eq!(decode(&frame), Err(DropReason::WrongMessageType));
    }

    #[test]
    fn rejects_missing_tlm_flag() {
        let mut s = VALID_FRAME.to_string();
        let flags_start = HEADER_HEX_LEN + offsets::PAYLOAD_FLAGS.start;
        let flags_end = HEADER_HEX_LEN + offsets::PAYLOAD_FLAGS.end;
        s.replace_range(flags_start..flags_end, "00");
        assert_eq!(decode(&s), Err(DropReason::MissingTlmFlag));
    }

    #[test]
    fn rejects_malformed_hex() {
        let frame = VALID_FRAME.replacen("AABBCCDDEEFF", "ZZBBCCDDEEFF", 1);
        assert_eq!(decode(&frame), Err(DropReason::MalformedHex));
    }

    #[test]
    fn mac_address_case_is_preserved() {
        let frame = VALID_FRAME.replacen("AABBCCDDEEFF", "aabbccddeeff", 1);
        let decoded = decode(&frame).unwrap();
        assert_eq!(decoded.mac_address, "aabbccddeeff");
    }
}
