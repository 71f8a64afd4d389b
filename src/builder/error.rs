//! Build errors for transitions, state graphs and machines.

use crate::audit::GraphViolation;
use crate::runtime::MachineError;
use thiserror::Error;

/// Errors that can occur while assembling a state graph or machine.
///
/// All of these are configuration errors: they surface immediately and are
/// never retried.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition '{transition}' has no guard. Call .when(..) or .on(..) before .build()")]
    MissingGuard { transition: String },

    #[error("Transition '{transition}' has no target state. Call .to(state) before .build()")]
    MissingTarget { transition: String },

    #[error("State {id} does not belong to this graph")]
    UnknownState { id: String },

    #[error("Final state '{state}' cannot have outgoing transitions")]
    FinalStateHasTransitions { state: String },

    #[error("Composite state '{state}' has no initial transition")]
    MissingInitialTransition { state: String },

    #[error("Initial transition of '{composite}' targets '{target}', which is not one of its internal states")]
    InitialTargetOutsideRegion { composite: String, target: String },

    #[error("State '{state}' is not composite and cannot have an initial transition")]
    NotComposite { state: String },

    #[error("Composite state '{state}' lists itself as an internal state")]
    SelfContainment { state: String },

    #[error("Transition from '{state}' targets '{target}', which is outside the scope that contains '{state}'")]
    TransitionLeavesScope { state: String, target: String },

    #[error("State graph not specified. Call .graph(graph) before .build()")]
    MissingGraph,

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("State graph failed audit with {} finding(s)", .0.len())]
    Audit(Vec<GraphViolation>),

    #[error("Activation failed: {0}")]
    Activation(#[from] MachineError),
}
