//! Pumpstate: a queue-pumped finite state machine library.
//!
//! Pumpstate embeds flat finite state machines in larger applications — UI
//! flows, protocol handlers, device control — and guarantees that message
//! processing is strictly serialized and never re-entrant. All machines
//! bound to one [`MessagePump`] share a single FIFO work queue: a hook or
//! observer that posts new messages while one is being processed enqueues
//! them instead of recursing, so delivery order stays globally FIFO and the
//! call stack stays flat no matter how deep the chains of follow-up
//! messages grow.
//!
//! # Core Concepts
//!
//! - **State** and **Message**: opaque symbolic values declared by the host,
//!   usually via the [`state_enum!`] and [`message_enum!`] macros
//! - **Message Pump**: the shared FIFO dispatcher behind every machine
//! - **State Machine**: transition table, four-phase lifecycle hooks
//!   (`leaving`/`entering` before the commit, `left`/`entered` after), and
//!   observable `StateChanging`/`StateChanged` events
//! - **Fault Protocol**: an unmapped (state, message) pair is offered to a
//!   fault handler, which may swallow it or request a recovery state
//!
//! # Example
//!
//! ```rust
//! use pumpstate::{message_enum, state_enum, MessagePump, StateMachine};
//!
//! state_enum! {
//!     enum Light {
//!         Red,
//!         Green,
//!         Yellow,
//!     }
//! }
//!
//! message_enum! {
//!     enum LightMessage {
//!         Next,
//!     }
//! }
//!
//! # fn main() -> Result<(), pumpstate::MachineError> {
//! let pump = MessagePump::new();
//! let light = StateMachine::<Light, LightMessage, ()>::new(pump, Light::Red, "light");
//!
//! light.add(Light::Red, LightMessage::Next, Light::Green)?;
//! light.add(Light::Green, LightMessage::Next, Light::Yellow)?;
//! light.add(Light::Yellow, LightMessage::Next, Light::Red)?;
//!
//! light.post_message(LightMessage::Next, ())?;
//! assert_eq!(light.state(), Light::Green);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;
pub mod machine;
pub mod macros;
pub mod pump;

// Re-export commonly used types
pub use core::{ChangePhase, Message, State, StateChangeEvent, TransitionKey};
pub use error::MachineError;
pub use machine::{BadTransition, Resolution, StateMachine, Subscription};
pub use pump::MessagePump;
