//! Page source abstraction
//!
//! The runtime only depends on [`PageSource`]; the mock table is the one
//! implementation shipped with the binary.

mod error;
mod mock;
mod types;

pub use error::{FetchError, FetchErrorKind};
pub use mock::MockSource;
pub use types::{Request, Response};

use async_trait::async_trait;
use std::sync::Arc;

/// Fetches one page of list data
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page named by the request
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError>;

    /// Name used in logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for Arc<T> {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        (**self).fetch(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Logging wrapper for page sources
pub struct LoggingSource {
    inner: Arc<dyn PageSource>,
    name: String,
}

impl LoggingSource {
    pub fn new(inner: Arc<dyn PageSource>) -> Self {
        let name = inner.name().to_string();
        Self { inner, name }
    }
}

#[async_trait]
impl PageSource for LoggingSource {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        let start = std::time::Instant::now();
        let result = self.inner.fetch(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    source = %self.name,
                    page = request.page,
                    duration_ms = %duration.as_millis(),
                    models = response.models.len(),
                    next_page = ?response.next_page,
                    "Page fetch completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    source = %self.name,
                    page = request.page,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "Page fetch failed"
                );
            }
        }

        result
    }

    fn name(&self) -> &str {
        &self.name
    }
}
