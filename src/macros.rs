//! Macros for declaring state and message domains.

/// Generate a fieldless enum implementing [`State`](crate::core::State).
///
/// Derives the traits the engine needs and generates `name()` plus the
/// `variants()` listing used to initialize the per-state hook tables.
///
/// # Example
///
/// ```
/// use pumpstate::state_enum;
///
/// state_enum! {
///     pub enum DoorState {
///         Open,
///         Closed,
///         Locked,
///     }
/// }
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn variants() -> &'static [Self] {
                &[$(Self::$variant),*]
            }
        }
    };
}

/// Generate a fieldless enum implementing [`Message`](crate::core::Message).
///
/// # Example
///
/// ```
/// use pumpstate::message_enum;
///
/// message_enum! {
///     pub enum DoorMessage {
///         Knock,
///         Unlock,
///     }
/// }
/// ```
#[macro_export]
macro_rules! message_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Message for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Message, State};

    state_enum! {
        enum TestState {
            Initial,
            Running,
            Done,
        }
    }

    message_enum! {
        enum TestMessage {
            Go,
            Halt,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::variants().len(), 3);
        assert_eq!(TestState::variants()[2], TestState::Done);
    }

    #[test]
    fn message_enum_macro_generates_trait() {
        assert_eq!(TestMessage::Go.name(), "Go");
        assert_eq!(TestMessage::Halt.name(), "Halt");
    }

    #[test]
    fn macro_supports_visibility_and_attributes() {
        state_enum! {
            /// States for a public machine.
            pub enum PublicState {
                On,
                Off,
            }
        }

        assert_eq!(PublicState::On.name(), "On");
        assert_eq!(PublicState::variants(), &[PublicState::On, PublicState::Off]);
    }
}
