//! Sensor traits for abstraction and testability
//!
//! These traits define the interface to the soil probe and the light sensor,
//! allowing the hardware drivers to be swapped with mocks for testing.

use core::fmt;
use core::future::Future;

/// Errors that can occur while talking to a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Device did not acknowledge its address
    NotFound,
    /// Bus transfer failed
    Bus,
    /// Read attempted before the sensor was configured
    NotInitialized,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::NotFound => f.write_str("device not found"),
            SensorError::Bus => f.write_str("bus error"),
            SensorError::NotInitialized => f.write_str("sensor not initialized"),
        }
    }
}

/// Analog soil moisture probe
///
/// Reads have no error channel; whatever the ADC returns is the reading.
pub trait SoilMoistureSensor {
    /// Read the raw ADC count
    fn read_raw(&mut self) -> impl Future<Output = i32>;
}

/// Ambient light sensor
pub trait LightSensor {
    /// Configure the sensor for continuous measurement
    fn init(&mut self) -> impl Future<Output = Result<(), SensorError>>;

    /// Read the current light level in lux
    fn read_lux(&mut self) -> impl Future<Output = Result<f32, SensorError>>;
}
