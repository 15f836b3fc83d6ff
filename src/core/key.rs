//! Transition-table key: a (state, message) pair compared by value.

use super::message::Message;
use super::state::State;

/// Immutable key indexing the transition table.
///
/// Two keys are equal exactly when both their states and their messages are
/// equal; identity plays no part. A machine holds at most one transition per
/// key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionKey<S: State, M: Message> {
    state: S,
    message: M,
}

impl<S: State, M: Message> TransitionKey<S, M> {
    pub fn new(state: S, message: M) -> Self {
        Self { state, message }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn message(&self) -> &M {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        On,
        Off,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::On => "On",
                Self::Off => "Off",
            }
        }

        fn variants() -> &'static [Self] {
            &[Self::On, Self::Off]
        }
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestMessage {
        Toggle,
        Reset,
    }

    impl Message for TestMessage {
        fn name(&self) -> &str {
            match self {
                Self::Toggle => "Toggle",
                Self::Reset => "Reset",
            }
        }
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn keys_compare_by_value() {
        let a = TransitionKey::new(TestState::On, TestMessage::Toggle);
        let b = TransitionKey::new(TestState::On, TestMessage::Toggle);
        assert_eq!(a, b);
    }

    #[test]
    fn equal_keys_hash_equal() {
        let a = TransitionKey::new(TestState::On, TestMessage::Toggle);
        let b = TransitionKey::new(TestState::On, TestMessage::Toggle);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn distinct_keys_differ() {
        let a = TransitionKey::new(TestState::On, TestMessage::Toggle);
        let b = TransitionKey::new(TestState::Off, TestMessage::Toggle);
        let c = TransitionKey::new(TestState::On, TestMessage::Reset);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
