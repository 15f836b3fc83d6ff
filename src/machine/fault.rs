//! The fault protocol for unmapped transitions.

use crate::core::{Message, State};

/// Record of an unmapped (state, message) pair, handed to the fault handler.
///
/// The handler may inspect the stalled message and its payload, and can call
/// [`request_state`](BadTransition::request_state) to continue processing as
/// if a resolver had produced that state and payload; the resulting
/// notifications then carry `faulted == true`. A handler that requests
/// nothing swallows the message: state stays put and nothing fires.
///
/// The record lives only for the duration of one fault notification.
pub struct BadTransition<S: State, M: Message, P> {
    current_state: S,
    message: M,
    payload: P,
    requested: Option<Recovery<S, P>>,
}

/// Recovery target adopted when a fault handler requests one.
pub(crate) struct Recovery<S, P> {
    pub state: S,
    pub payload: P,
}

impl<S: State, M: Message, P> BadTransition<S, M, P> {
    pub(crate) fn new(current_state: S, message: M, payload: P) -> Self {
        Self {
            current_state,
            message,
            payload,
            requested: None,
        }
    }

    /// The state the machine was in when the lookup missed.
    pub fn current_state(&self) -> &S {
        &self.current_state
    }

    /// The message that had no registered transition.
    pub fn message(&self) -> &M {
        &self.message
    }

    /// The payload that accompanied the stalled message.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Request that processing continue into `state` with `payload`.
    ///
    /// A later call replaces an earlier request; the last one wins.
    pub fn request_state(&mut self, state: S, payload: P) {
        self.requested = Some(Recovery { state, payload });
    }

    pub(crate) fn into_recovery(self) -> Option<Recovery<S, P>> {
        self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Stuck,
        Rescued,
        Parked,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Stuck => "Stuck",
                Self::Rescued => "Rescued",
                Self::Parked => "Parked",
            }
        }

        fn variants() -> &'static [Self] {
            &[Self::Stuck, Self::Rescued, Self::Parked]
        }
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestMessage {
        Poke,
    }

    impl Message for TestMessage {
        fn name(&self) -> &str {
            match self {
                Self::Poke => "Poke",
            }
        }
    }

    #[test]
    fn no_request_means_no_recovery() {
        let fault = BadTransition::new(TestState::Stuck, TestMessage::Poke, 0_u32);

        assert_eq!(fault.current_state(), &TestState::Stuck);
        assert_eq!(fault.message(), &TestMessage::Poke);
        assert!(fault.into_recovery().is_none());
    }

    #[test]
    fn request_state_records_recovery() {
        let mut fault = BadTransition::new(TestState::Stuck, TestMessage::Poke, 1_u32);
        fault.request_state(TestState::Rescued, 2);

        let recovery = fault.into_recovery().unwrap();
        assert_eq!(recovery.state, TestState::Rescued);
        assert_eq!(recovery.payload, 2);
    }

    #[test]
    fn later_request_replaces_earlier() {
        let mut fault = BadTransition::new(TestState::Stuck, TestMessage::Poke, 0_u32);
        fault.request_state(TestState::Rescued, 1);
        fault.request_state(TestState::Parked, 2);

        let recovery = fault.into_recovery().unwrap();
        assert_eq!(recovery.state, TestState::Parked);
        assert_eq!(recovery.payload, 2);
    }
}
