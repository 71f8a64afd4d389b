//! Builder API for assembling state graphs and machines.
//!
//! [`GraphBuilder`] declares states and wires transitions between them,
//! [`TransitionBuilder`] offers a fluent way to describe one transition and
//! [`StateMachineBuilder`] turns a finished graph into a running machine.
//! The free functions below cover the common transition shapes.

pub mod error;
pub mod graph;
pub mod machine;
pub mod transition;

pub use error::BuildError;
pub use graph::GraphBuilder;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Guard, StateId, Transition};

/// Transition taken when an event with the given name arrives.
///
/// # Example
///
/// ```
/// use composite_fsm::builder::{on_event, GraphBuilder};
/// use composite_fsm::core::Event;
///
/// let mut builder = GraphBuilder::new();
/// let ringing = builder.simple("Ringing");
/// let transition = on_event("CallDialed", ringing).named("CallDial");
///
/// assert!(transition.accepts(&Event::new("CallDialed")));
/// assert_eq!(transition.target(), ringing);
/// ```
pub fn on_event(event: impl Into<String>, target: StateId) -> Transition {
    Transition::new(Guard::on(event), target)
}

/// Unconditional transition, used as the initial transition of a composite.
pub fn initial(target: StateId) -> Transition {
    Transition::new(Guard::always(), target)
}

/// Transition taken on the completion event.
pub fn completion(target: StateId) -> Transition {
    Transition::new(Guard::completion(), target)
}

/// Start a named transition with the fluent builder.
pub fn transition(name: impl Into<String>) -> TransitionBuilder {
    TransitionBuilder::new().named(name)
}
