//! Pure value types and traits for the state machine engine.
//!
//! This module contains everything the engine treats as plain data:
//! - State and message definitions via the `State` and `Message` traits
//! - Transition-table keys compared by value
//! - Event descriptors delivered to observers
//!
//! Nothing here has side effects; the imperative machinery lives in
//! [`crate::pump`] and [`crate::machine`].

mod event;
mod key;
mod message;
mod state;

pub use event::{ChangePhase, StateChangeEvent};
pub use key::TransitionKey;
pub use message::Message;
pub use state::State;
