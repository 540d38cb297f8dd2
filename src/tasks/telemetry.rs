//! Telemetry task
//!
//! Runs the read-and-send cycle forever, one cycle per period.

use embedded_hal_async::delay::DelayNs;

use crate::link::TelemetryLink;
use crate::sensor::{LightSensor, SoilMoistureSensor};
use crate::telemetry::TelemetrySender;

/// Task that drives the sender; cycles never overlap
pub async fn telemetry_task<L, S, Li, D>(mut sender: TelemetrySender<L, S, Li, D>) -> !
where
    L: TelemetryLink,
    S: SoilMoistureSensor,
    Li: LightSensor,
    D: DelayNs,
{
    loop {
        sender.run_cycle().await;
    }
}
