//! Fetch error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fetch error with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::NotFound, message)
    }

    #[allow(dead_code)] // The mock source never fails on transport
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Network, message)
    }

    #[allow(dead_code)] // For real sources that decode a payload
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Decode, message)
    }

    #[allow(dead_code)] // API completeness
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Unknown, message)
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// The source has no such page - not retryable
    NotFound,
    /// Transport failure, timeout - retryable
    Network,
    /// Payload could not be decoded - not retryable
    Decode,
    /// Unknown error
    Unknown,
}

impl FetchErrorKind {
    /// Whether re-triggering the same request may succeed.
    ///
    /// Nothing retries automatically; this only informs logs and the renderer.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Network)
    }
}
