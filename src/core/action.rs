//! Side-effecting actions run on entry, exit, or when a transition fires.

use super::event::Event;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by an action.
///
/// The engine never retries or swallows action failures; they abort the
/// call that triggered the action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Type alias for action functions.
pub type ActionFn = dyn Fn(&Event) -> Result<(), ActionError> + Send + Sync;

/// A named operation invoked synchronously by the engine.
///
/// Actions receive the event that caused them: the dispatched event for
/// ordinary transitions and entry/exit, [`Event::completion`] for completion
/// transitions, [`Event::activation`] when a machine is first activated.
/// An action must not call back into the machine that runs it.
///
/// # Example
///
/// ```rust
/// use composite_fsm::core::{Action, Event};
/// use std::sync::{Arc, Mutex};
///
/// let played = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&played);
/// let play_muzak = Action::from_fn("PlayMuzak", move |e: &Event| {
///     sink.lock().unwrap().push(e.name().to_string());
/// });
///
/// play_muzak.perform(&Event::new("PlacedOnHold")).unwrap();
/// assert_eq!(*played.lock().unwrap(), vec!["PlacedOnHold".to_string()]);
/// ```
#[derive(Clone)]
pub struct Action {
    label: String,
    perform: Arc<ActionFn>,
}

impl Action {
    /// Create a fallible action.
    pub fn new<F>(label: impl Into<String>, perform: F) -> Self
    where
        F: Fn(&Event) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            perform: Arc::new(perform),
        }
    }

    /// Create an action that cannot fail.
    pub fn from_fn<F>(label: impl Into<String>, perform: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        Self::new(label, move |event| {
            perform(event);
            Ok(())
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the action.
    pub fn perform(&self, event: &Event) -> Result<(), ActionError> {
        (self.perform)(event)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
