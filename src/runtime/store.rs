//! Canonical state container

use crate::state_machine::{reduce, Action, FeedState};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Holds the one canonical state sequence of a feed.
///
/// Multicast uses a `watch` channel, which replays the latest snapshot only:
/// a new subscriber sees the current state and everything published after it,
/// never earlier history. A slow subscriber may skip intermediate snapshots.
///
/// Only the runtime loop folds actions into the store, so state is never
/// mutated concurrently.
#[derive(Clone)]
pub struct FeedStore {
    tx: Arc<watch::Sender<FeedState>>,
}

impl FeedStore {
    pub fn new(initial: FeedState) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Latest snapshot
    pub fn current(&self) -> FeedState {
        self.tx.borrow().clone()
    }

    /// Read the latest snapshot in place. The channel stays locked for the
    /// duration of `f`, so `f` must not publish.
    pub fn with_current<R>(&self, f: impl FnOnce(&FeedState) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.tx.subscribe()
    }

    /// Stream of snapshots starting with the current one
    pub fn updates(&self) -> WatchStream<FeedState> {
        WatchStream::new(self.tx.subscribe())
    }

    /// Fold an action and publish the result. Every applied action notifies
    /// subscribers, even when the snapshot is unchanged.
    pub(super) fn apply(&self, action: Action) {
        self.tx.send_modify(|state| {
            let previous = std::mem::take(state);
            *state = reduce(previous, action);
        });
    }
}

impl Default for FeedStore {
    fn default() -> Self {
        Self::new(FeedState::default())
    }
}
