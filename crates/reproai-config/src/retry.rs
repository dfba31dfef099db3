//! Retry policy applied to every outbound call.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_max_attempts() -> u32 {
    2
}

const fn default_backoff_ms() -> u64 {
    500
}

const fn default_max_backoff_ms() -> u64 {
    8_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Total attempts per call, including the first. `1` disables retries.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry; doubles on each further retry.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// Upper bound for any single delay, including `Retry-After` waits.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `retry` (1-based), capped at `max_backoff_ms`.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u64 << retry.saturating_sub(1).min(16);
        Duration::from_millis(self.backoff_ms.saturating_mul(factor).min(self.max_backoff_ms))
    }

    /// Cap a server-provided wait at `max_backoff_ms`.
    pub fn cap(&self, wait: Duration) -> Duration {
        wait.min(Duration::from_millis(self.max_backoff_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        let config = RetryConfig::default();
        assert_eq!(config.backoff(1), Duration::from_millis(500));
        assert_eq!(config.backoff(2), Duration::from_millis(1_000));
        assert_eq!(config.backoff(4), Duration::from_millis(4_000));
        assert_eq!(config.backoff(5), Duration::from_millis(8_000));
        assert_eq!(config.backoff(60), Duration::from_millis(8_000));
    }

    #[test]
    fn cap_limits_server_waits() {
        let config = RetryConfig::default();
        assert_eq!(config.cap(Duration::from_secs(60)), Duration::from_secs(8));
        assert_eq!(config.cap(Duration::from_secs(1)), Duration::from_secs(1));
    }
}
