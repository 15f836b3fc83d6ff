//! Errors raised by state machine registration and dispatch.

use thiserror::Error;

/// Unrecoverable errors from a state machine.
///
/// All variants are contract violations rather than runtime conditions to
/// retry. The recoverable path for "this input makes no sense in the current
/// state" is the fault protocol (`on_bad_transition`), not `Err`.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("machine '{machine}': a transition for state '{state}' and message '{message}' is already registered")]
    DuplicateTransition {
        machine: String,
        state: String,
        message: String,
    },

    #[error("machine '{machine}': no transition from state '{state}' for message '{message}' and no fault handler installed")]
    UnhandledTransition {
        machine: String,
        state: String,
        message: String,
    },

    #[error("machine '{machine}': a message was dispatched while another was still being processed")]
    ReentrantDispatch { machine: String },
}
