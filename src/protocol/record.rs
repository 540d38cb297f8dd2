//! Sensor record sent over the air
//!
//! # Wire Format
//!
//! The record is sent as a flat, unframed byte sequence in the ESP32's
//! native layout:
//! ```text
//! [soil_moisture: i32 LE][light_level: f32 LE]
//! ```
//!
//! There is no header, version, checksum or sequence number. The receiver
//! must use the same layout.

use core::fmt;

/// Light level reported when the light sensor could not be read
pub const LIGHT_READ_FAILED: f32 = -1.0;

/// Size of an encoded record in bytes
pub const RECORD_SIZE: usize = 8;

/// One soil/light reading, built fresh every cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRecord {
    /// Raw ADC count from the soil probe, uncalibrated
    pub soil_moisture: i32,
    /// Ambient light in lux, or [`LIGHT_READ_FAILED`]
    pub light_level: f32,
}

impl SensorRecord {
    /// Build a record from raw readings without any clamping
    pub fn new(soil_moisture: i32, light_level: f32) -> Self {
        Self {
            soil_moisture,
            light_level,
        }
    }

    /// Whether the light field carries the read-failure sentinel
    pub fn light_read_failed(&self) -> bool {
        self.light_level == LIGHT_READ_FAILED
    }

    /// Encode the record for transmission
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[..4].copy_from_slice(&self.soil_moisture.to_le_bytes());
        bytes[4..].copy_from_slice(&self.light_level.to_le_bytes());
        bytes
    }

    /// Decode a record as the receiver sees it
    ///
    /// Returns `None` unless `bytes` is exactly [`RECORD_SIZE`] long.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != RECORD_SIZE {
            return None;
        }

        let soil_moisture = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let light_level = f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

        Some(Self::new(soil_moisture, light_level))
    }
}

impl fmt::Display for SensorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "soil moisture: {}, light level: {:.2}",
            self.soil_moisture, self.light_level
        )
    }
}
