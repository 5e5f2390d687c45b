//! Feed state types

use crate::backend::{FetchError, FetchErrorKind};
use serde::{Deserialize, Serialize};

// ============================================================================
// List Data
// ============================================================================

/// A single list entry. No identity: the same name may appear twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Pagination cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextPage {
    /// More data is available; fetch this page next
    Page(u32),
    /// Pagination is exhausted
    ReachedLast,
}

impl NextPage {
    /// First page of a fresh listing
    pub const FIRST: NextPage = NextPage::Page(1);
}

// ============================================================================
// Network State
// ============================================================================

/// Fetch failure as recorded in state.
///
/// Built from a [`FetchError`] so the state stays comparable and serializable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl From<FetchError> for FeedError {
    fn from(error: FetchError) -> Self {
        Self {
            kind: error.kind,
            message: error.message,
        }
    }
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Network status of the feed. Exactly one variant at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NetworkState {
    #[default]
    Idle,

    /// One fetch has been dispatched and not yet resolved
    Requesting,

    /// Last fetch failed. Cleared only by a later action.
    Error(FeedError),
}

// ============================================================================
// Feed State
// ============================================================================

/// Single authoritative snapshot of the list screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedState {
    /// Append-only across pages, replaced wholesale on refresh
    pub models: Vec<Model>,
    pub next_page: NextPage,
    pub network_state: NetworkState,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            next_page: NextPage::FIRST,
            network_state: NetworkState::Idle,
        }
    }
}

impl FeedState {
    /// Check if a fetch is in flight
    pub fn is_requesting(&self) -> bool {
        matches!(self.network_state, NetworkState::Requesting)
    }

    /// Check if the last fetch failed
    #[allow(dead_code)] // State query utility
    pub fn has_error(&self) -> bool {
        matches!(self.network_state, NetworkState::Error(_))
    }
}
