//! Pure state reduction

use super::state::{FeedState, NetworkState};
use super::Action;

/// Fold one action onto the previous state.
///
/// Total over every `Action` variant. Errors leave `models` and `next_page`
/// untouched so prior data stays visible.
pub fn reduce(state: FeedState, action: Action) -> FeedState {
    match action {
        Action::Refreshed { models, next_page } => FeedState {
            models,
            next_page,
            network_state: NetworkState::Idle,
        },

        Action::LoadedMore { models, next_page } => {
            let mut all = state.models;
            all.extend(models);
            FeedState {
                models: all,
                next_page,
                network_state: NetworkState::Idle,
            }
        }

        Action::Requested => FeedState {
            network_state: NetworkState::Requesting,
            ..state
        },

        Action::ErrorOccurred { error } => FeedState {
            network_state: NetworkState::Error(error),
            ..state
        },
    }
}
