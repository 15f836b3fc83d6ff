//! Event descriptors delivered to state-change observers.

use super::message::Message;
use super::state::State;
use serde::Serialize;

/// Which side of the commit point a notification describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ChangePhase {
    /// The candidate state is known but the machine still reports the old
    /// state.
    Changing,
    /// The new state has been committed.
    Changed,
}

/// Immutable descriptor of one transition, handed to observers.
///
/// The same descriptor shape is used for both notification phases; observers
/// that only care about real changes can compare `old_state` and `new_state`
/// themselves (self-transitions notify like any other transition).
#[derive(Clone, Debug, Serialize)]
#[serde(bound(serialize = "P: Serialize"))]
pub struct StateChangeEvent<S: State, M: Message, P> {
    pub new_state: S,
    pub old_state: S,
    pub message: M,
    pub phase: ChangePhase,
    pub payload: P,
    /// True when this transition came from the fault protocol rather than a
    /// registered resolver.
    pub faulted: bool,
}
