//! Hardware configuration constants for the ESP32 soil/light sensor node

/// Soil moisture probe (FC-28 analog output)
pub mod soil {
    /// ADC1 channel pin for the probe
    pub const ADC_PIN: u8 = 34;
}

/// I2C bus for the BH1750 light sensor
pub mod i2c {
    pub const SDA: u8 = 21;
    pub const SCL: u8 = 22;
    pub const FREQUENCY_KHZ: u32 = 100;
}

/// BH1750 ambient light sensor
pub mod bh1750 {
    /// Address with the ADDR pin pulled low
    pub const ADDRESS: u8 = 0x23;

    /// Raw counts per lux in high-resolution mode
    pub const COUNTS_PER_LUX: f32 = 1.2;

    /// Worst-case first conversion time in high-resolution mode
    pub const MEASUREMENT_TIME_MS: u32 = 180;
}

/// Receiver node for telemetry
pub mod peer {
    /// Station MAC address of the receiving ESP32
    pub const ADDRESS: [u8; 6] = [0xE0, 0xE2, 0xE6, 0x62, 0xF5, 0x68];
}

/// Send/retry timing
pub mod telemetry {
    /// Retries after the initial send attempt
    pub const MAX_RETRIES: u8 = 3;

    /// Wait before the first retry
    pub const BASE_BACKOFF_MS: u32 = 500;

    /// Backoff growth factor between retries
    pub const BACKOFF_MULTIPLIER: u32 = 2;

    /// Wait between the end of one cycle and the start of the next
    pub const CYCLE_PERIOD_MS: u32 = 2000;
}

/// Link layer limits
pub mod link {
    /// Pending send-status notifications kept for the logger task
    pub const STATUS_QUEUE_DEPTH: usize = 4;
}
