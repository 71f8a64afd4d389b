//! Events presented to a state machine.
//!
//! An event is an immutable named stimulus. Guards decide whether a
//! transition accepts it, usually by comparing names.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Name of the reserved event used to trigger completion transitions.
///
/// When the active child of a composite moves into a state that models the
/// end of its region, the composite re-evaluates its own transitions against
/// an event with this name.
pub const COMPLETION_EVENT: &str = "__completion__";

/// Name of the reserved event handed to entry actions when a machine is
/// activated without an external stimulus.
pub const ACTIVATION_EVENT: &str = "__activation__";

/// Named stimulus with an optional JSON payload.
///
/// Two events are equivalent for the purpose of name-based guards iff their
/// names match; the payload is available to guards and actions that want to
/// look further.
///
/// # Example
///
/// ```rust
/// use composite_fsm::core::Event;
/// use serde_json::json;
///
/// let event = Event::new("CardInserted").with_payload(json!({ "card": "1234" }));
///
/// assert_eq!(event.name(), "CardInserted");
/// assert!(!event.is_completion());
/// assert_eq!(event.payload().unwrap()["card"], "1234");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

impl Event {
    /// Create an event without payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    /// Attach a payload, replacing any previous one.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// The reserved completion event.
    pub fn completion() -> Self {
        Self::new(COMPLETION_EVENT)
    }

    /// The reserved activation event.
    pub fn activation() -> Self {
        Self::new(ACTIVATION_EVENT)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Check whether this is the reserved completion event.
    pub fn is_completion(&self) -> bool {
        self.name == COMPLETION_EVENT
    }

    /// Check whether this event carries the given name.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

impl From<&str> for Event {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Event {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
