//! BH1750 ambient light sensor driver
//!
//! Drives the sensor in continuous high-resolution mode over any async I2C
//! bus implementing `embedded_hal_async::i2c::I2c`.

use crate::config::bh1750::{ADDRESS, COUNTS_PER_LUX, MEASUREMENT_TIME_MS};
use crate::sensor::traits::{LightSensor, SensorError};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{Error, ErrorKind, I2c};

/// BH1750 instruction opcodes
mod opcode {
    pub const POWER_ON: u8 = 0x01;
    pub const RESET: u8 = 0x07;
    pub const CONTINUOUS_HIGH_RES_MODE: u8 = 0x10;
}

/// BH1750 light sensor
///
/// `init()` must succeed before readings are taken.
pub struct Bh1750<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    initialised: bool,
}

impl<I2C, D> Bh1750<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver at the default address (ADDR pin low)
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, ADDRESS)
    }

    /// Create a driver at a custom address
    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            initialised: false,
        }
    }

    async fn command(&mut self, opcode: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[opcode])
            .await
            .map_err(|e| map_i2c_error(e.kind()))
    }

    /// Convert a raw measurement to lux
    fn raw_to_lux(raw: u16) -> f32 {
        raw as f32 / COUNTS_PER_LUX
    }
}

fn map_i2c_error(kind: ErrorKind) -> SensorError {
    match kind {
        ErrorKind::NoAcknowledge(_) => SensorError::NotFound,
        _ => SensorError::Bus,
    }
}

impl<I2C, D> LightSensor for Bh1750<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    async fn init(&mut self) -> Result<(), SensorError> {
        self.initialised = false;

        self.command(opcode::POWER_ON).await?;
        self.command(opcode::RESET).await?;
        self.command(opcode::CONTINUOUS_HIGH_RES_MODE).await?;

        // First conversion must finish before the data register is valid
        self.delay.delay_ms(MEASUREMENT_TIME_MS).await;

        self.initialised = true;
        Ok(())
    }

    async fn read_lux(&mut self) -> Result<f32, SensorError> {
        if !self.initialised {
            return Err(SensorError::NotInitialized);
        }

        let mut buf = [0u8; 2];
        self.i2c
            .read(self.address, &mut buf)
            .await
            .map_err(|e| map_i2c_error(e.kind()))?;

        Ok(Self::raw_to_lux(u16::from_be_bytes(buf)))
    }
}
