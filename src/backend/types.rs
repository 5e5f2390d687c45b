//! Request/response types for page sources

use crate::state_machine::{Model, NextPage};
use serde::{Deserialize, Serialize};

/// Request for one page. The page number is the whole identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    pub page: u32,
}

impl Request {
    pub fn new(page: u32) -> Self {
        Self { page }
    }
}

/// One page of list data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub models: Vec<Model>,
    pub next_page: NextPage,
}
