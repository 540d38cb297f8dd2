//! FC-28 soil moisture probe on the ESP32 ADC
//!
//! One-shot conversions on ADC1; the raw count is returned untouched.

use esp_hal::analog::adc::{Adc, AdcConfig, AdcPin, Attenuation};
use esp_hal::peripherals::{ADC1, GPIO34};
use esp_hal::Blocking;

use crate::sensor::traits::SoilMoistureSensor;

/// Soil probe wired to GPIO34 (ADC1 channel 6)
pub struct AdcSoilProbe<'d> {
    adc: Adc<'d, ADC1<'d>, Blocking>,
    pin: AdcPin<GPIO34<'d>, ADC1<'d>>,
}

impl<'d> AdcSoilProbe<'d> {
    /// Configure the probe pin with full-scale (11 dB) attenuation
    pub fn new(adc1: ADC1<'d>, pin: GPIO34<'d>) -> Self {
        let mut config = AdcConfig::new();
        let pin = config.enable_pin(pin, Attenuation::_11dB);
        let adc = Adc::new(adc1, config);

        Self { adc, pin }
    }
}

impl SoilMoistureSensor for AdcSoilProbe<'_> {
    async fn read_raw(&mut self) -> i32 {
        loop {
            // WouldBlock until the conversion completes
            if let Ok(raw) = self.adc.read_oneshot(&mut self.pin) {
                return i32::from(raw);
            }
        }
    }
}
