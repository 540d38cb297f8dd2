//! One-time setup of the link and the light sensor

use core::fmt;

use log::{error, info};

use crate::link::{LinkError, TelemetryLink};
use crate::sensor::{LightSensor, SensorError};
use crate::telemetry::config::TelemetryConfig;

/// Failure during the setup phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// Link layer failed to come up
    LinkInit(LinkError),
    /// Receiver could not be registered with the link
    PeerRegistration(LinkError),
    /// Light sensor did not respond to configuration
    LightSensorInit(SensorError),
}

impl SetupError {
    /// Whether the node must stop instead of entering the send loop
    pub fn is_fatal(&self) -> bool {
        matches!(self, SetupError::LightSensorInit(_))
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::LinkInit(e) => write!(f, "link init failed: {}", e),
            SetupError::PeerRegistration(e) => write!(f, "peer registration failed: {}", e),
            SetupError::LightSensorInit(e) => write!(f, "light sensor init failed: {}", e),
        }
    }
}

/// Bring up the link, register the receiver, then configure the light sensor
///
/// Stops at the first failure; later steps are not attempted.
pub async fn setup<L, Li>(
    link: &mut L,
    light: &mut Li,
    config: &TelemetryConfig,
) -> Result<(), SetupError>
where
    L: TelemetryLink,
    Li: LightSensor,
{
    if let Err(e) = link.init().await {
        error!("Error initializing ESP-NOW: {}", e);
        return Err(SetupError::LinkInit(e));
    }

    match link.register_peer(&config.peer).await {
        Ok(()) => info!("Peer {} added successfully", config.peer),
        Err(e) => {
            error!("Failed to add peer {}: {}", config.peer, e);
            return Err(SetupError::PeerRegistration(e));
        }
    }

    match light.init().await {
        Ok(()) => info!("BH1750 initialized"),
        Err(e) => {
            error!("Error initializing BH1750 sensor: {}", e);
            return Err(SetupError::LightSensorInit(e));
        }
    }

    Ok(())
}
