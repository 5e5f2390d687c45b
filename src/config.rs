//! Runtime configuration from environment variables

use std::str::FromStr;
use std::time::Duration;

const DEFAULT_MOCK_DELAY_MS: u64 = 500;
const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Configuration for the feed runtime and the mock page source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Artificial latency of the mock source
    pub mock_delay: Duration,
    /// Bound of the runtime's message queue
    pub channel_capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            mock_delay: Duration::from_millis(DEFAULT_MOCK_DELAY_MS),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl FeedConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Invalid values fall back to
    /// the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mock_delay_ms = parse_or(
            "PAGEFLOW_MOCK_DELAY_MS",
            lookup("PAGEFLOW_MOCK_DELAY_MS"),
            DEFAULT_MOCK_DELAY_MS,
        );
        let channel_capacity = parse_or(
            "PAGEFLOW_CHANNEL_CAPACITY",
            lookup("PAGEFLOW_CHANNEL_CAPACITY"),
            DEFAULT_CHANNEL_CAPACITY,
        );

        // mpsc::channel panics on zero capacity
        let channel_capacity = if channel_capacity == 0 {
            tracing::warn!("PAGEFLOW_CHANNEL_CAPACITY must be positive, using default");
            DEFAULT_CHANNEL_CAPACITY
        } else {
            channel_capacity
        };

        Self {
            mock_delay: Duration::from_millis(mock_delay_ms),
            channel_capacity,
        }
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key = %key, value = %value, "Invalid config value, using default");
            default
        }),
    }
}
