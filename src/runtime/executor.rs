//! Feed runtime executor

use super::store::FeedStore;
use super::FeedHandle;
use crate::backend::{FetchError, PageSource, Request, Response};
use crate::config::FeedConfig;
use crate::state_machine::{transition, Action, Effect, Event, FeedState, FetchMode};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

/// Messages consumed by the runtime loop. Events and fetch completions share
/// one queue, so they are folded strictly one at a time.
#[derive(Debug)]
pub(super) enum Message {
    Event(Event),
    FetchComplete {
        request_id: u64,
        request: Request,
        mode: FetchMode,
        result: Result<Response, FetchError>,
    },
    /// Acknowledged once every message queued before it has been folded
    Barrier(oneshot::Sender<()>),
}

/// The fetch the runtime is waiting for
#[derive(Debug, Clone, Copy)]
struct InFlight {
    request_id: u64,
    request: Request,
}

/// Generic feed runtime that can work with any page source
pub struct FeedRuntime<P>
where
    P: PageSource + 'static,
{
    store: FeedStore,
    source: Arc<P>,
    message_rx: mpsc::Receiver<Message>,
    message_tx: mpsc::Sender<Message>,
    shutdown: CancellationToken,
    /// Monotonic id handed to each dispatched fetch
    next_request_id: u64,
    in_flight: Option<InFlight>,
}

impl<P> FeedRuntime<P>
where
    P: PageSource + 'static,
{
    fn new(
        store: FeedStore,
        source: P,
        message_rx: mpsc::Receiver<Message>,
        message_tx: mpsc::Sender<Message>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            store,
            source: Arc::new(source),
            message_rx,
            message_tx,
            shutdown,
            next_request_id: 0,
            in_flight: None,
        }
    }

    /// Start a runtime seeded at the initial state and return its handle.
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn(source: P, config: &FeedConfig) -> FeedHandle {
        let store = FeedStore::new(FeedState::default());
        let (message_tx, message_rx) = mpsc::channel(config.channel_capacity);
        let shutdown = CancellationToken::new();

        let runtime = Self::new(
            store.clone(),
            source,
            message_rx,
            message_tx.clone(),
            shutdown.clone(),
        );
        tokio::spawn(runtime.run());

        FeedHandle {
            message_tx,
            store,
            _drop_guard: Arc::new(shutdown.clone().drop_guard()),
            shutdown,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(source = %self.source.name(), "Starting feed runtime");

        // Process messages in a loop - one at a time
        loop {
            tokio::select! {
                biased;

                () = self.shutdown.cancelled() => break,

                message = self.message_rx.recv() => match message {
                    Some(message) => self.process_message(message),
                    None => break,
                },
            }
        }

        if let Some(in_flight) = self.in_flight {
            tracing::debug!(
                request_id = in_flight.request_id,
                page = in_flight.request.page,
                "Dropping in-flight fetch on shutdown"
            );
        }
        tracing::info!("Feed runtime stopped");
    }

    fn process_message(&mut self, message: Message) {
        match message {
            Message::Event(event) => self.handle_event(event),
            Message::FetchComplete {
                request_id,
                request,
                mode,
                result,
            } => self.handle_fetch_complete(request_id, request, mode, result),
            Message::Barrier(ack) => {
                let _ = ack.send(());
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        // Transition reads the latest snapshot; the Requested it emits is
        // folded before the next message is read.
        let result = self.store.with_current(|state| transition(state, event));

        if result.is_empty() {
            tracing::debug!(?event, "No more pages, ignoring event");
            return;
        }
        if result.effects.is_empty() {
            tracing::debug!(?event, "Fetch already in flight, not dispatching");
        }

        for action in result.actions {
            self.apply(action);
        }
        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Fetch { request, mode } => {
                self.next_request_id += 1;
                let request_id = self.next_request_id;

                if let Some(previous) = self.in_flight.replace(InFlight {
                    request_id,
                    request,
                }) {
                    tracing::warn!(
                        previous_id = previous.request_id,
                        previous_page = previous.request.page,
                        "Superseding in-flight fetch; its result will be discarded"
                    );
                }

                // Spawn fetch as background task
                let source = self.source.clone();
                let message_tx = self.message_tx.clone();

                tokio::spawn(async move {
                    tracing::info!(request_id, page = request.page, ?mode, "Fetching page (background)");
                    let result = source.fetch(&request).await;
                    let _ = message_tx
                        .send(Message::FetchComplete {
                            request_id,
                            request,
                            mode,
                            result,
                        })
                        .await;
                });
            }
        }
    }

    fn handle_fetch_complete(
        &mut self,
        request_id: u64,
        request: Request,
        mode: FetchMode,
        result: Result<Response, FetchError>,
    ) {
        match self.in_flight {
            Some(in_flight) if in_flight.request_id == request_id => {
                self.in_flight = None;
            }
            _ => {
                tracing::warn!(
                    request_id,
                    page = request.page,
                    "Discarding stale fetch result"
                );
                return;
            }
        }

        if let Err(e) = &result {
            tracing::warn!(page = request.page, error = %e, kind = ?e.kind, "Fetch failed");
        }
        self.apply(mode.resolve(result));
    }

    fn apply(&self, action: Action) {
        let kind = action.kind();
        self.store.apply(action);
        self.store.with_current(|state| {
            tracing::debug!(
                action = kind,
                models = state.models.len(),
                next_page = ?state.next_page,
                requesting = state.is_requesting(),
                "Applied action"
            );
        });
    }
}
