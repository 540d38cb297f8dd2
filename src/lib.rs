#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod link;
pub mod protocol;
pub mod sensor;
pub mod telemetry;

#[cfg(test)]
mod delay;
#[cfg(test)]
mod log_capture;

// These modules depend on embassy/esp-hal features only available with embedded feature
#[cfg(feature = "embedded")]
pub mod tasks;
