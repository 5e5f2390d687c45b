//! Events that can occur on the list screen

use serde::{Deserialize, Serialize};

/// Events emitted by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Screen became visible for the first time; loads page 1
    FirstAppear,
    /// User scrolled to the end of the list; loads the next page
    ReachedBottom,
}
