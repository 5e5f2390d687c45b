//! Effects produced by state transitions

use super::action::Action;
use super::state::FeedError;
use crate::backend::{FetchError, Request, Response};

/// How a fetched page is folded into the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Replace the list (page 1)
    Refresh,
    /// Append to the list
    LoadMore,
}

impl FetchMode {
    /// Translate a fetch outcome into the terminal action for this mode.
    ///
    /// Errors never escape: a failed fetch becomes `ErrorOccurred`.
    pub fn resolve(self, result: Result<Response, FetchError>) -> Action {
        match (self, result) {
            (FetchMode::Refresh, Ok(response)) => Action::Refreshed {
                models: response.models,
                next_page: response.next_page,
            },
            (FetchMode::LoadMore, Ok(response)) => Action::LoadedMore {
                models: response.models,
                next_page: response.next_page,
            },
            (_, Err(error)) => Action::ErrorOccurred {
                error: FeedError::from(error),
            },
        }
    }
}

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch a page in the background and feed the outcome back
    Fetch { request: Request, mode: FetchMode },
}

impl Effect {
    pub fn refresh() -> Self {
        Effect::Fetch {
            request: Request::new(1),
            mode: FetchMode::Refresh,
        }
    }

    pub fn load_more(page: u32) -> Self {
        Effect::Fetch {
            request: Request::new(page),
            mode: FetchMode::LoadMore,
        }
    }
}
