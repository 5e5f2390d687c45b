//! Fixed-table page source with artificial latency

use super::{FetchError, PageSource, Request, Response};
use crate::state_machine::{Model, NextPage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Page sizes of the built-in table, in page order
const PAGE_SIZES: [usize; 3] = [20, 20, 10];

/// Serves pages from an in-memory table after a fixed delay.
///
/// Unknown pages fail with `NotFound`.
pub struct MockSource {
    pages: HashMap<u32, Response>,
    delay: Duration,
}

impl MockSource {
    /// Built-in three page table (20, 20 and 10 items)
    pub fn new(delay: Duration) -> Self {
        Self::with_pages(default_pages(), delay)
    }

    pub fn with_pages(pages: HashMap<u32, Response>, delay: Duration) -> Self {
        Self { pages, delay }
    }
}

#[async_trait]
impl PageSource for MockSource {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.pages
            .get(&request.page)
            .cloned()
            .ok_or_else(|| FetchError::not_found(format!("No page {}", request.page)))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn default_pages() -> HashMap<u32, Response> {
    let last = PAGE_SIZES.len();
    let mut offset = 0;
    let mut pages = HashMap::new();

    for (index, size) in PAGE_SIZES.iter().copied().enumerate() {
        let page = u32::try_from(index + 1).unwrap_or(u32::MAX);
        let next_page = if index + 1 == last {
            NextPage::ReachedLast
        } else {
            NextPage::Page(page + 1)
        };
        let models = (offset..offset + size)
            .map(|n| Model::new(format!("Item {}", n + 1)))
            .collect();
        offset += size;
        pages.insert(page, Response { models, next_page });
    }

    pages
}
