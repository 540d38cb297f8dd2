//! Telemetry sender
//!
//! Reads both sensors, packs the readings into a [`SensorRecord`] and sends
//! it to the configured peer. A rejected send is retried with exponential
//! backoff; once the retries run out the cycle gives up quietly and the next
//! cycle starts over with fresh readings.
//!
//! Per cycle the sender moves through
//! `Idle -> Attempting(0) -> ... -> Attempting(max_retries)` and ends in
//! either `Succeeded` or `GivenUp`. Only the synchronous send result drives
//! these transitions.

use embedded_hal_async::delay::DelayNs;
use log::{error, info, warn};

use crate::link::{LinkError, TelemetryLink};
use crate::protocol::{SensorRecord, LIGHT_READ_FAILED};
use crate::sensor::{LightSensor, SoilMoistureSensor};
use crate::telemetry::config::TelemetryConfig;

/// Terminal state of one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Attempt `attempt` was accepted (0 is the initial send)
    Succeeded { attempt: u8 },
    /// Every attempt was rejected
    GivenUp { last_error: LinkError },
}

/// Summary of one read-and-send cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// Record built this cycle
    pub record: SensorRecord,
    /// Send calls made, including the initial one
    pub attempts: u8,
    /// How the cycle ended
    pub outcome: CycleOutcome,
}

impl CycleReport {
    /// Whether the record was accepted by the link
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, CycleOutcome::Succeeded { .. })
    }
}

/// Periodic soil/light telemetry sender
pub struct TelemetrySender<L, S, Li, D> {
    link: L,
    soil: S,
    light: Li,
    delay: D,
    config: TelemetryConfig,
}

impl<L, S, Li, D> TelemetrySender<L, S, Li, D>
where
    L: TelemetryLink,
    S: SoilMoistureSensor,
    Li: LightSensor,
    D: DelayNs,
{
    /// Create a sender over an already set up link and light sensor
    pub fn new(link: L, soil: S, light: Li, delay: D, config: TelemetryConfig) -> Self {
        Self {
            link,
            soil,
            light,
            delay,
            config,
        }
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn soil(&self) -> &S {
        &self.soil
    }

    pub fn light(&self) -> &Li {
        &self.light
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Run one cycle, then wait out the cycle period
    pub async fn run_cycle(&mut self) -> CycleReport {
        let report = self.read_and_send().await;
        self.delay.delay_ms(self.config.cycle_period_ms).await;
        report
    }

    /// Read both sensors and deliver one record, retrying rejected sends
    pub async fn read_and_send(&mut self) -> CycleReport {
        let record = self.read_record().await;
        info!("Sensor record: {}", record);

        let payload = record.to_bytes();
        let peer = self.config.peer;

        let mut last_error = match self.link.send(&peer, &payload).await {
            Ok(()) => {
                info!("Data sent successfully");
                return CycleReport {
                    record,
                    attempts: 1,
                    outcome: CycleOutcome::Succeeded { attempt: 0 },
                };
            }
            Err(e) => {
                warn!("Error sending data: {}", e);
                e
            }
        };

        let retry = self.config.retry;
        for attempt in 1..=retry.max_retries {
            self.delay.delay_ms(retry.backoff_ms(attempt)).await;

            match self.link.send(&peer, &payload).await {
                Ok(()) => {
                    info!("Retry succeeded: {}", record);
                    return CycleReport {
                        record,
                        attempts: attempt.saturating_add(1),
                        outcome: CycleOutcome::Succeeded { attempt },
                    };
                }
                Err(e) => {
                    warn!("Retry failed, attempt #{} ({})", attempt, e);
                    last_error = e;
                }
            }
        }

        error!("Retry failed, giving up");
        CycleReport {
            record,
            attempts: retry.max_retries.saturating_add(1),
            outcome: CycleOutcome::GivenUp { last_error },
        }
    }

    /// Take one reading from each sensor
    ///
    /// A failed light read becomes [`LIGHT_READ_FAILED`] and is still sent.
    async fn read_record(&mut self) -> SensorRecord {
        let soil_moisture = self.soil.read_raw().await;

        let light_level = match self.light.read_lux().await {
            Ok(lux) if lux != LIGHT_READ_FAILED => lux,
            Ok(_) => {
                warn!("Error reading light level from BH1750");
                LIGHT_READ_FAILED
            }
            Err(e) => {
                warn!("Error reading light level from BH1750: {}", e);
                LIGHT_READ_FAILED
            }
        };

        SensorRecord::new(soil_moisture, light_level)
    }
}
