//! Recording delay for testing
//!
//! Stands in for `embassy_time::Delay` and remembers every wait it was asked
//! to perform instead of sleeping.

use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

/// Delay that records requested waits in milliseconds
pub struct RecordingDelay {
    waits_ms: Vec<u32, 32>,
}

impl RecordingDelay {
    /// Create a new delay with no recorded waits
    pub fn new() -> Self {
        Self {
            waits_ms: Vec::new(),
        }
    }

    /// All waits so far, in call order
    pub fn waits_ms(&self) -> &[u32] {
        &self.waits_ms
    }

    /// Forget recorded waits
    pub fn clear(&mut self) {
        self.waits_ms.clear();
    }
}

impl Default for RecordingDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        let _ = self.waits_ms.push(ns / 1_000_000);
    }

    async fn delay_us(&mut self, us: u32) {
        let _ = self.waits_ms.push(us / 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        let _ = self.waits_ms.push(ms);
    }
}
