//! Runtime for driving a feed
//!
//! One loop per feed owns the store and folds every action; fetches run as
//! background tasks and report back through the same queue.

mod executor;
mod store;

#[cfg(test)]
pub mod testing;

pub use executor::FeedRuntime;
pub use store::FeedStore;

use crate::state_machine::{Event, FeedState};
use executor::Message;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Errors returned by [`FeedHandle`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Feed runtime has stopped")]
    Stopped,
}

/// Handle to interact with a running feed.
///
/// Cheap to clone. The runtime stops when [`FeedHandle::shutdown`] is called
/// or the last clone is dropped.
#[derive(Clone)]
pub struct FeedHandle {
    message_tx: mpsc::Sender<Message>,
    store: FeedStore,
    shutdown: CancellationToken,
    _drop_guard: Arc<DropGuard>,
}

impl FeedHandle {
    /// Send an event to the feed
    pub async fn send(&self, event: Event) -> Result<(), RuntimeError> {
        if self.shutdown.is_cancelled() {
            return Err(RuntimeError::Stopped);
        }
        self.message_tx
            .send(Message::Event(event))
            .await
            .map_err(|_| RuntimeError::Stopped)
    }

    /// Latest state snapshot
    pub fn current(&self) -> FeedState {
        self.store.current()
    }

    /// Subscribe to state snapshots (latest plus future ones)
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.store.subscribe()
    }

    /// Snapshots as a stream, starting with the current one
    pub fn updates(&self) -> WatchStream<FeedState> {
        self.store.updates()
    }

    /// Wait until every event sent so far has been folded and no fetch is in
    /// flight, then return the settled snapshot.
    pub async fn settled(&self) -> Result<FeedState, RuntimeError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.message_tx
            .send(Message::Barrier(ack_tx))
            .await
            .map_err(|_| RuntimeError::Stopped)?;
        ack_rx.await.map_err(|_| RuntimeError::Stopped)?;

        let mut rx = self.subscribe();
        let state = rx
            .wait_for(|state| !state.is_requesting())
            .await
            .map_err(|_| RuntimeError::Stopped)?;
        Ok(state.clone())
    }

    /// Stop the runtime. In-flight fetch results are dropped.
    pub fn shutdown(&self) {
        tracing::info!("Feed shutdown requested");
        self.shutdown.cancel();
    }
}
