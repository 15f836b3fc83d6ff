//! Core Message trait for inputs offered to a state machine.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for messages (events) offered to a state machine.
///
/// Like states, messages are opaque symbolic values: the engine only uses
/// them as transition-table keys, forwards them to resolvers and observers,
/// and prints their names. The [`message_enum!`](crate::message_enum) macro
/// derives everything for a fieldless enum; data accompanying a message
/// travels in the payload instead.
pub trait Message: Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> {
    /// Get the message's name for display/logging.
    fn name(&self) -> &str;
}
