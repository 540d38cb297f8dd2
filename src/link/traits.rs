//! Peer-to-peer link trait for abstraction and testability
//!
//! This trait defines the interface for the connectionless wireless link,
//! allowing the ESP-NOW adapter to be swapped with a mock for testing.

use core::fmt;
use core::future::Future;

/// Fixed 6-byte hardware address of a link peer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerAddress([u8; 6]);

impl PeerAddress {
    /// Create an address from its raw bytes
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// The raw address bytes
    pub const fn bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl Default for PeerAddress {
    fn default() -> Self {
        Self::new(crate::config::peer::ADDRESS)
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}", a, b, c, d, e, g)
    }
}

/// Reasons the link can reject a send or setup call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// Link layer not initialised
    NotInitialized,
    /// Invalid argument passed to the link layer
    InvalidArgument,
    /// Internal link layer error
    Internal,
    /// Link layer ran out of memory
    OutOfMemory,
    /// Peer is not registered
    PeerNotFound,
    /// Radio interface error
    InterfaceError,
    /// Any other vendor error code
    Unknown(u32),
}

/// ESP-NOW vendor error codes (`esp_err_t`)
pub mod esp_now_code {
    /// Generic `ESP_FAIL`
    pub const FAIL: u32 = -1i32 as u32;
    pub const NOT_INIT: u32 = 12389;
    pub const ARG: u32 = 12390;
    pub const NO_MEM: u32 = 12391;
    pub const FULL: u32 = 12392;
    pub const NOT_FOUND: u32 = 12393;
    pub const INTERNAL: u32 = 12394;
    pub const EXIST: u32 = 12395;
    pub const IF: u32 = 12396;
}

impl LinkError {
    /// Classify an ESP-NOW vendor error code
    ///
    /// Codes outside the closed set keep their numeric value.
    pub fn from_code(code: u32) -> Self {
        match code {
            esp_now_code::NOT_INIT => LinkError::NotInitialized,
            esp_now_code::ARG => LinkError::InvalidArgument,
            esp_now_code::NO_MEM => LinkError::OutOfMemory,
            esp_now_code::NOT_FOUND => LinkError::PeerNotFound,
            esp_now_code::INTERNAL => LinkError::Internal,
            esp_now_code::IF => LinkError::InterfaceError,
            other => LinkError::Unknown(other),
        }
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::NotInitialized => f.write_str("link not initialized"),
            LinkError::InvalidArgument => f.write_str("invalid argument"),
            LinkError::Internal => f.write_str("internal error"),
            LinkError::OutOfMemory => f.write_str("out of memory"),
            LinkError::PeerNotFound => f.write_str("peer not found"),
            LinkError::InterfaceError => f.write_str("interface error"),
            LinkError::Unknown(code) => write!(f, "unknown error: {}", code),
        }
    }
}

/// On-air delivery notification for an accepted send
///
/// Reported after the link has finished transmitting. Observed for
/// logging only; retry decisions use the synchronous send result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendCompletion {
    /// Peer the frame was addressed to
    pub peer: PeerAddress,
    /// Whether the peer acknowledged the frame at the MAC layer
    pub delivered: bool,
}

impl SendCompletion {
    /// Human-readable status for the console log
    pub fn status(&self) -> &'static str {
        if self.delivered {
            "Message sent"
        } else {
            "Message failed"
        }
    }
}

/// Abstract telemetry link interface for testability
///
/// This trait allows the telemetry sender to work with either the real
/// ESP-NOW link or a mock implementation for testing.
pub trait TelemetryLink {
    /// Bring up the link layer
    fn init(&mut self) -> impl Future<Output = Result<(), LinkError>>;

    /// Register the peer that frames will be addressed to
    fn register_peer(&mut self, peer: &PeerAddress)
        -> impl Future<Output = Result<(), LinkError>>;

    /// Hand a frame to the link for transmission
    ///
    /// `Ok` means the frame was accepted, not that it was delivered.
    fn send(
        &mut self,
        peer: &PeerAddress,
        data: &[u8],
    ) -> impl Future<Output = Result<(), LinkError>>;
}

#[cfg(test)]
pub mod mock {
    //! Mock link for testing

    use super::*;
    use crate::protocol::RECORD_SIZE;
    use core::cell::RefCell;
    use heapless::{Deque, Vec};

    /// A frame handed to the mock link
    #[derive(Debug, Clone, PartialEq)]
    pub struct SentFrame {
        pub peer: PeerAddress,
        pub data: Vec<u8, RECORD_SIZE>,
    }

    /// Mock link for unit testing
    pub struct MockLink {
        /// Results returned by successive send() calls, `Ok` once drained
        send_results: RefCell<Deque<Result<(), LinkError>, 16>>,
        /// Record of every send() call, accepted or not
        send_history: RefCell<Vec<SentFrame, 16>>,
        /// Peers registered via register_peer()
        peers: RefCell<Vec<PeerAddress, 4>>,
        /// Error to return from init()
        init_error: RefCell<Option<LinkError>>,
        /// Error to return from register_peer()
        register_error: RefCell<Option<LinkError>>,
        /// Whether init has been called successfully
        initialised: RefCell<bool>,
    }

    impl MockLink {
        /// Create a new mock link that accepts every frame
        pub fn new() -> Self {
            Self {
                send_results: RefCell::new(Deque::new()),
                send_history: RefCell::new(Vec::new()),
                peers: RefCell::new(Vec::new()),
                init_error: RefCell::new(None),
                register_error: RefCell::new(None),
                initialised: RefCell::new(false),
            }
        }

        /// Queue the result of the next unqueued send() call
        pub fn queue_send_result(&self, result: Result<(), LinkError>) {
            let _ = self.send_results.borrow_mut().push_back(result);
        }

        /// Queue `count` consecutive send failures
        pub fn queue_send_failures(&self, error: LinkError, count: usize) {
            for _ in 0..count {
                self.queue_send_result(Err(error));
            }
        }

        /// Set an error to be returned by init()
        pub fn set_init_error(&self, error: LinkError) {
            *self.init_error.borrow_mut() = Some(error);
        }

        /// Set an error to be returned by register_peer()
        pub fn set_register_error(&self, error: LinkError) {
            *self.register_error.borrow_mut() = Some(error);
        }

        /// Get every frame passed to send()
        pub fn get_send_history(&self) -> Vec<SentFrame, 16> {
            self.send_history.borrow().clone()
        }

        /// Number of send() calls so far
        pub fn send_count(&self) -> usize {
            self.send_history.borrow().len()
        }

        /// Peers registered so far
        pub fn get_peers(&self) -> Vec<PeerAddress, 4> {
            self.peers.borrow().clone()
        }

        /// Check if the link has been initialised
        pub fn is_initialised(&self) -> bool {
            *self.initialised.borrow()
        }
    }

    impl Default for MockLink {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TelemetryLink for MockLink {
        async fn init(&mut self) -> Result<(), LinkError> {
            if let Some(error) = self.init_error.borrow_mut().take() {
                return Err(error);
            }
            *self.initialised.borrow_mut() = true;
            Ok(())
        }

        async fn register_peer(&mut self, peer: &PeerAddress) -> Result<(), LinkError> {
            if let Some(error) = self.register_error.borrow_mut().take() {
                return Err(error);
            }
            self.peers
                .borrow_mut()
                .push(*peer)
                .map_err(|_| LinkError::OutOfMemory)
        }

        async fn send(&mut self, peer: &PeerAddress, data: &[u8]) -> Result<(), LinkError> {
            let mut frame = Vec::new();
            frame
                .extend_from_slice(data)
                .map_err(|_| LinkError::InvalidArgument)?;
            let _ = self.send_history.borrow_mut().push(SentFrame {
                peer: *peer,
                data: frame,
            });

            self.send_results.borrow_mut().pop_front().unwrap_or(Ok(()))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_mock_send_defaults_to_ok() {
            let mut link = MockLink::new();
            let peer = PeerAddress::default();

            futures::executor::block_on(async {
                link.init().await.unwrap();
                link.send(&peer, &[0x01, 0x02]).await.unwrap();

                let history = link.get_send_history();
                assert_eq!(history.len(), 1);
                assert_eq!(history[0].peer, peer);
                assert_eq!(history[0].data.as_slice(), &[0x01, 0x02]);
            });
        }

        #[test]
        fn test_mock_queued_results_in_order() {
            let mut link = MockLink::new();
            let peer = PeerAddress::default();

            futures::executor::block_on(async {
                link.queue_send_result(Err(LinkError::PeerNotFound));
                link.queue_send_result(Ok(()));

                assert_eq!(link.send(&peer, &[0x01]).await, Err(LinkError::PeerNotFound));
                assert_eq!(link.send(&peer, &[0x01]).await, Ok(()));
                // Queue drained, falls back to accepting
                assert_eq!(link.send(&peer, &[0x01]).await, Ok(()));
                assert_eq!(link.send_count(), 3);
            });
        }

        #[test]
        fn test_mock_init_error() {
            let mut link = MockLink::new();

            futures::executor::block_on(async {
                link.set_init_error(LinkError::Internal);
                assert_eq!(link.init().await, Err(LinkError::Internal));
                assert!(!link.is_initialised());

                link.init().await.unwrap();
                assert!(link.is_initialised());
            });
        }
    }
}
