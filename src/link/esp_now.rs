//! ESP-NOW link adapter
//!
//! Wraps the esp-radio ESP-NOW driver to implement the TelemetryLink trait.
//! Delivery notifications are forwarded to the send-status channel and never
//! fed back into the send result.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use esp_radio::esp_now::{Error, EspNow, EspNowError, EspNowWifiInterface, PeerInfo};
use log::info;

use crate::config::link::STATUS_QUEUE_DEPTH;
use crate::link::traits::{esp_now_code, LinkError, PeerAddress, SendCompletion, TelemetryLink};

/// Type alias for the send-status channel sender
pub type StatusSender = Sender<'static, CriticalSectionRawMutex, SendCompletion, STATUS_QUEUE_DEPTH>;

/// ESP-NOW backed telemetry link
pub struct EspNowLink<'d> {
    esp_now: EspNow<'d>,
    status: StatusSender,
}

impl<'d> EspNowLink<'d> {
    /// Create a link around an ESP-NOW instance taken from the WiFi interfaces
    pub fn new(esp_now: EspNow<'d>, status: StatusSender) -> Self {
        Self { esp_now, status }
    }
}

/// Vendor code behind an ESP-NOW driver error
fn vendor_code(error: Error) -> u32 {
    match error {
        Error::NotInitialized => esp_now_code::NOT_INIT,
        Error::InvalidArgument => esp_now_code::ARG,
        Error::OutOfMemory => esp_now_code::NO_MEM,
        Error::PeerListFull => esp_now_code::FULL,
        Error::NotFound => esp_now_code::NOT_FOUND,
        Error::Internal => esp_now_code::INTERNAL,
        Error::PeerExists => esp_now_code::EXIST,
        Error::InterfaceMismatch => esp_now_code::IF,
        Error::Other(code) => code,
        #[allow(unreachable_patterns)]
        _ => esp_now_code::FAIL,
    }
}

impl From<EspNowError> for LinkError {
    fn from(error: EspNowError) -> Self {
        match error {
            EspNowError::Error(e) => LinkError::from_code(vendor_code(e)),
            EspNowError::Initialization(_) => LinkError::NotInitialized,
            EspNowError::DuplicateInstance => LinkError::Internal,
            EspNowError::SendFailed => LinkError::Unknown(esp_now_code::FAIL),
            #[allow(unreachable_patterns)]
            _ => LinkError::Unknown(esp_now_code::FAIL),
        }
    }
}

impl TelemetryLink for EspNowLink<'_> {
    async fn init(&mut self) -> Result<(), LinkError> {
        let version = self.esp_now.version()?;
        info!("ESP-NOW version {}", version);
        Ok(())
    }

    async fn register_peer(&mut self, peer: &PeerAddress) -> Result<(), LinkError> {
        // Default channel, no encryption
        self.esp_now.add_peer(PeerInfo {
            interface: EspNowWifiInterface::Sta,
            peer_address: *peer.bytes(),
            lmk: None,
            channel: None,
            encrypt: false,
        })?;
        Ok(())
    }

    async fn send(&mut self, peer: &PeerAddress, data: &[u8]) -> Result<(), LinkError> {
        let waiter = self.esp_now.send(peer.bytes(), data)?;
        // SendWaiter spins until the send callback even when dropped, so the
        // executor stalls here either way. The result only goes to the log.
        let delivered = waiter.wait().is_ok();

        // Dropped when the logger falls behind
        let _ = self.status.try_send(SendCompletion {
            peer: *peer,
            delivered,
        });

        Ok(())
    }
}
