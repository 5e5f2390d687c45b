//! Mock implementations for testing
//!
//! These mocks enable integration testing of the runtime without timing
//! assumptions.

use crate::backend::{FetchError, PageSource, Request, Response};
use crate::state_machine::FeedState;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::{watch, Semaphore};

// ============================================================================
// Scripted Source
// ============================================================================

/// Page source that returns queued results in order, whatever the page
pub struct ScriptedSource {
    results: Mutex<VecDeque<Result<Response, FetchError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<Request>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: Response) {
        self.results.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: FetchError) {
        self.results.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        self.requests.lock().unwrap().push(*request);
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::network("No scripted response queued")))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

// ============================================================================
// Gated Source
// ============================================================================

/// Wraps a source and holds every fetch until [`GatedSource::release`] is
/// called, so tests can observe the `Requesting` state.
pub struct GatedSource<S> {
    inner: S,
    gate: Semaphore,
    requests: Mutex<Vec<Request>>,
}

impl<S: PageSource> GatedSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            gate: Semaphore::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Let `count` pending or future fetches through
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }

    /// Requests in the order they were started
    pub fn recorded_requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl<S: PageSource> PageSource for GatedSource<S> {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        self.requests.lock().unwrap().push(*request);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| FetchError::network("Gate closed"))?;
        permit.forget();
        self.inner.fetch(request).await
    }

    fn name(&self) -> &str {
        "gated"
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Wait until the published state matches, failing the test after 5s.
///
/// Checks the current snapshot first.
pub async fn wait_for_state(
    rx: &mut watch::Receiver<FeedState>,
    predicate: impl FnMut(&FeedState) -> bool,
) -> FeedState {
    let state = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(predicate))
        .await
        .expect("timed out waiting for state")
        .expect("store closed");
    state.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FetchErrorKind, MockSource};
    use crate::state_machine::{Model, NextPage};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_scripted_source() {
        let source = ScriptedSource::new();
        source.queue_response(Response {
            models: vec![Model::new("x")],
            next_page: NextPage::ReachedLast,
        });

        let response = source.fetch(&Request::new(4)).await.unwrap();
        assert_eq!(response.models.len(), 1);

        // Second call should fail (no more responses)
        let error = source.fetch(&Request::new(5)).await.unwrap_err();
        assert_eq!(error.kind, FetchErrorKind::Network);
        assert_eq!(
            source.recorded_requests(),
            vec![Request::new(4), Request::new(5)]
        );
    }

    #[tokio::test]
    async fn test_gated_source_blocks_until_released() {
        let source = Arc::new(GatedSource::new(MockSource::new(Duration::ZERO)));

        let task = {
            let source = source.clone();
            tokio::spawn(async move { source.fetch(&Request::new(1)).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!task.is_finished());
        assert_eq!(source.recorded_requests(), vec![Request::new(1)]);

        source.release(1);
        let response = task.await.unwrap().unwrap();
        assert_eq!(response.models.len(), 20);
    }
}
