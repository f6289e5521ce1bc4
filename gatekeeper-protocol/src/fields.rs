//! Byte/hex-char offsets for the GateKeeper gateway scan payload.
//!
//! A device entry's `data` field is an ASCII hex string. The first
//! [`HEADER_HEX_LEN`] hex characters are a gateway-level header with no
//! fields this backend cares about and are dropped before any offset
//! below applies.

/// Hex characters making up the gateway header, dropped unconditionally.
pub const HEADER_HEX_LEN: usize = 16;

/// Minimum hex-character length of the payload *after* the header is
/// dropped (14 bytes: activator number, type, counter, MAC, RSSI, flags,
/// battery voltage).
pub const MIN_PAYLOAD_HEX_LEN: usize = 28;

/// Message type byte that marks a presence-scan packet. Comparison is an
/// exact string match, not a parsed-byte comparison.
pub const PRESENCE_MESSAGE_TYPE: &str = "03";

/// Bit in the packet payload flags byte that must be set (Eddystone TLM
/// present) for the packet to be considered.
pub const TLM_FLAG_BIT: u8 = 0x04;

/// Hex-char ranges of each field, relative to the start of the payload
/// (i.e. after [`HEADER_HEX_LEN`] has already been stripped).
pub mod offsets {
    use std::ops::Range;

    /// Activator friendly number, big-endian u16.
    pub const ACTIVATOR_NUMBER: Range<usize> = 0..4;
    /// Message type, exact 2-char string match against [`super::PRESENCE_MESSAGE_TYPE`].
    pub const MESSAGE_TYPE: Range<usize> = 4..6;
    /// Rolling packet counter, u8.
    pub const PACKET_COUNTER: Range<usize> = 6..8;
    /// Beacon MAC address, canonical hex string, case preserved.
    pub const MAC_ADDRESS: Range<usize> = 8..20;
    /// RSSI byte; subtract 256 for dBm. Informational only.
    pub const RSSI: Range<usize> = 20..22;
    /// Packet payload flags; bit [`super::TLM_FLAG_BIT`] must be set.
    pub const PAYLOAD_FLAGS: Range<usize> = 22..24;
    /// Battery voltage in millivolts, big-endian u16.
    pub const BATTERY_MV: Range<usize> = 24..28;
}
