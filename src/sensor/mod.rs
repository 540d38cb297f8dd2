pub mod bh1750;
pub mod traits;

#[cfg(feature = "embedded")]
pub mod soil;

pub use bh1750::Bh1750;
#[cfg(feature = "embedded")]
pub use soil::AdcSoilProbe;
pub use traits::{LightSensor, SensorError, SoilMoistureSensor};
