//! Actions folded into the feed state

use super::state::{FeedError, Model, NextPage};

/// Everything the reducer understands.
///
/// Produced by the transition function (`Requested`) or by resolving a
/// fetch outcome (the other three).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// First page arrived; replaces the list
    Refreshed {
        models: Vec<Model>,
        next_page: NextPage,
    },

    /// A later page arrived; extends the list
    LoadedMore {
        models: Vec<Model>,
        next_page: NextPage,
    },

    /// A fetch is (still) in flight
    Requested,

    /// The fetch failed
    ErrorOccurred { error: FeedError },
}

impl Action {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Refreshed { .. } => "refreshed",
            Action::LoadedMore { .. } => "loaded_more",
            Action::Requested => "requested",
            Action::ErrorOccurred { .. } => "error_occurred",
        }
    }
}
