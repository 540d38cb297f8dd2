pub mod traits;

#[cfg(feature = "embedded")]
pub mod esp_now;

#[cfg(feature = "embedded")]
pub use esp_now::EspNowLink;
pub use traits::{LinkError, PeerAddress, SendCompletion, TelemetryLink};
