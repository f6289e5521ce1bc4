pub mod pipeline;
pub mod recorder;
pub mod registry;

pub use pipeline::{process_device, DeviceOutcome};
