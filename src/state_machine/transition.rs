//! Pure event handling: decides which actions to emit and whether to fetch
//!
//! The fetch itself happens in the runtime. Its outcome comes back through
//! [`FetchMode::resolve`](super::effect::FetchMode::resolve) as the single
//! terminal action following `Requested`.

use super::state::{FeedState, NextPage};
use super::{Action, Effect, Event};

/// Result of handling one event
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TransitionResult {
    /// Actions to fold immediately, in order
    pub actions: Vec<Action>,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.effects.is_empty()
    }
}

/// Pure transition function
///
/// Given the same state and event it always produces the same result. The
/// runtime folds the returned `Requested` before reading the next message, so
/// a second trigger always sees `Requesting` and never dispatches another
/// fetch.
pub fn transition(state: &FeedState, event: Event) -> TransitionResult {
    match (event, state.next_page) {
        // Pagination is terminal
        (Event::ReachedBottom, NextPage::ReachedLast) => TransitionResult::new(),

        // A fetch is already in flight: re-affirm, don't dispatch
        (Event::FirstAppear | Event::ReachedBottom, _) if state.is_requesting() => {
            TransitionResult::new().with_action(Action::Requested)
        }

        (Event::FirstAppear, _) => TransitionResult::new()
            .with_action(Action::Requested)
            .with_effect(Effect::refresh()),

        (Event::ReachedBottom, NextPage::Page(page)) => TransitionResult::new()
            .with_action(Action::Requested)
            .with_effect(Effect::load_more(page)),
    }
}
