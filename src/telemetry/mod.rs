pub mod config;
pub mod sender;
pub mod setup;

pub use config::{RetryPolicy, TelemetryConfig};
pub use sender::{CycleOutcome, CycleReport, TelemetrySender};
pub use setup::{setup, SetupError};
