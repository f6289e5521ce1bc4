use thiserror::Error;

/// Why a device entry was dropped. These are never surfaced to the
/// gateway as HTTP errors — ingestion is best-effort — but are
/// returned so the caller can count them per-reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DropReason {
    #[error("data field missing or empty")]
    MissingData,
    #[error("payload shorter than the minimum frame size")]
    TooShort,
    #[error("payload is not valid hex")]
    MalformedHex,
    #[error("message type is not a presence packet")]
    WrongMessageType,
    #[error("Eddystone TLM flag not set")]
    MissingTlmFlag,
}
