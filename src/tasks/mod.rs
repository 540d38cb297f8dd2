//! Embassy tasks module
//!
//! Contains the async tasks run by the firmware.

pub mod send_status;
pub mod telemetry;

pub use send_status::{send_status_task, StatusReceiver, SEND_STATUS_CHANNEL};
pub use telemetry::telemetry_task;
