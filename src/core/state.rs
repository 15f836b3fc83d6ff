//! Core State trait for state machine states.
//!
//! All state machine states must implement this trait, which gives the
//! engine a symbolic name for diagnostics and the full finite state domain
//! for hook-table initialization.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// States are opaque symbolic values drawn from a finite domain. The engine
/// never inspects them beyond using them as table keys, forwarding them to
/// callbacks, and printing their names.
///
/// # Required Traits
///
/// - `Clone`: states are copied into transition keys and event payloads
/// - `Eq` + `Hash`: states index the transition and hook tables by value
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states are plain data; hosts may log or
///   persist them
///
/// The [`state_enum!`](crate::state_enum) macro derives all of this for a
/// fieldless enum.
///
/// # Example
///
/// ```rust
/// use pumpstate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Open,
///     Closed,
///     Locked,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///             Self::Locked => "Locked",
///         }
///     }
///
///     fn variants() -> &'static [Self] {
///         &[Self::Open, Self::Closed, Self::Locked]
///     }
/// }
/// ```
pub trait State: Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// The complete, closed set of states.
    ///
    /// Declaring the domain up front lets the machine initialize every
    /// per-state hook table to a no-op at construction time, so a hook
    /// lookup can never miss.
    fn variants() -> &'static [Self]
    where
        Self: Sized;
}
