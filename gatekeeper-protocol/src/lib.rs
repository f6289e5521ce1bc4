//! Wire decoder for GateKeeper gateway beacon scan payloads.
//!
//! One gateway HTTP post carries a `device_list`; each device entry's
//! `data` field is an ASCII hex blob that [`decode`] turns into a typed
//! [`DecodedFrame`] or rejects with a [`error::DropReason`].

pub mod error;
pub mod fields;
pub mod frame;

pub use error::DropReason;
pub use frame::{decode, DecodedFrame};
