//! Runtime errors raised by a state machine.

use crate::core::ActionError;
use thiserror::Error;

/// Errors that can occur while dispatching events or moving the active
/// configuration.
///
/// An event that matches no transition is not an error; it is reported as
/// [`StepResult::Unhandled`](super::StepResult::Unhandled).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    #[error("No active state")]
    NoActiveState,

    #[error("No internal active state in composite state '{composite}'")]
    NoActiveChild { composite: String },

    #[error("Final state '{state}' cannot handle events")]
    FinalStateDispatch { state: String },

    #[error("State {id} is not a top-level state of this machine")]
    NotARootState { id: String },

    #[error("Active state configuration is empty")]
    EmptyConfiguration,

    #[error("No state named '{name}' exists in {scope}")]
    UnknownStateName { name: String, scope: String },

    #[error("State '{state}' is not a composite state but configuration elements remain: {remaining:?}")]
    TrailingConfiguration {
        state: String,
        remaining: Vec<String>,
    },

    #[error("Action '{label}' failed: {source}")]
    Action {
        label: String,
        #[source]
        source: ActionError,
    },
}
