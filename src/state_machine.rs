//! Feed state machine
//!
//! Implements the Flux pattern with pure state transitions: events are turned
//! into actions and effects by [`transition`], actions are folded into state
//! by [`reduce`].

mod action;
mod effect;
pub mod event;
mod reducer;
pub mod state;
pub(crate) mod transition;


pub use action::Action;
pub use effect::{Effect, FetchMode};
pub use event::Event;
pub use reducer::reduce;
pub use state::{FeedState, Model, NextPage};
pub use transition::transition;
