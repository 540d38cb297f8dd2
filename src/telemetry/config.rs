//! Telemetry sender configuration

use crate::config::telemetry;
use crate::link::PeerAddress;

/// Retry policy applied after a rejected send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt
    pub max_retries: u8,
    /// Wait before the first retry in milliseconds
    pub base_backoff_ms: u32,
    /// Factor applied to the wait after every retry
    pub multiplier: u32,
}

impl RetryPolicy {
    /// Wait before retry number `retry` (1-based)
    ///
    /// `base * multiplier^(retry - 1)`, saturating at `u32::MAX`.
    pub fn backoff_ms(&self, retry: u8) -> u32 {
        let mut wait = self.base_backoff_ms;
        for _ in 1..retry {
            wait = wait.saturating_mul(self.multiplier);
        }
        wait
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: telemetry::MAX_RETRIES,
            base_backoff_ms: telemetry::BASE_BACKOFF_MS,
            multiplier: telemetry::BACKOFF_MULTIPLIER,
        }
    }
}

/// Immutable configuration for the telemetry sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Receiver of every record
    pub peer: PeerAddress,
    /// Send retry policy
    pub retry: RetryPolicy,
    /// Wait after each cycle in milliseconds
    pub cycle_period_ms: u32,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            peer: PeerAddress::default(),
            retry: RetryPolicy::default(),
            cycle_period_ms: telemetry::CYCLE_PERIOD_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backoff_sequence() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.backoff_ms(1), 500);
        assert_eq!(policy.backoff_ms(2), 1000);
        assert_eq!(policy.backoff_ms(3), 2000);
    }

    #[test]
    fn test_backoff_saturates() {
        let policy = RetryPolicy {
            max_retries: 40,
            base_backoff_ms: 500,
            multiplier: 2,
        };
        assert_eq!(policy.backoff_ms(40), u32::MAX);
    }

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.cycle_period_ms, 2000);
        assert_eq!(config.peer.bytes(), &[0xE0, 0xE2, 0xE6, 0x62, 0xF5, 0x68]);
    }
}
