//! Guard predicates for controlling transitions.
//!
//! Guards are pure boolean functions over an [`Event`]. A transition may
//! only fire when its guard accepts the event being dispatched.

use super::event::{Event, COMPLETION_EVENT};
use std::fmt;

/// Pure predicate that decides whether a transition accepts an event.
///
/// Every transition carries exactly one guard. Guards must be deterministic
/// and free of side effects; they may be evaluated several times per
/// dispatch while the engine looks for a matching transition.
///
/// # Example
///
/// ```rust
/// use composite_fsm::core::{Event, Guard};
///
/// let on_cancel = Guard::on("Canceled");
///
/// assert!(on_cancel.check(&Event::new("Canceled")));
/// assert!(!on_cancel.check(&Event::new("Authenticated")));
/// ```
pub struct Guard {
    predicate: Box<dyn Fn(&Event) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    ///
    /// ```rust
    /// use composite_fsm::core::{Event, Guard};
    /// use serde_json::json;
    ///
    /// let large_withdrawal = Guard::new(|e: &Event| {
    ///     e.is("Withdraw") && e.payload().and_then(|p| p["amount"].as_u64()) > Some(500)
    /// });
    ///
    /// assert!(large_withdrawal.check(&Event::new("Withdraw").with_payload(json!({ "amount": 900 }))));
    /// assert!(!large_withdrawal.check(&Event::new("Withdraw").with_payload(json!({ "amount": 20 }))));
    /// ```
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Event) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard accepting events with the given name.
    pub fn on(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(move |event| event.name() == name)
    }

    /// Guard accepting any event whose name is one of `names`.
    pub fn any_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        Self::new(move |event| names.iter().any(|n| n == event.name()))
    }

    /// Guard accepting every event, including the completion event.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Guard accepting only the reserved completion event.
    pub fn completion() -> Self {
        Self::on(COMPLETION_EVENT)
    }

    /// Check whether the guard accepts the event.
    pub fn check(&self, event: &Event) -> bool {
        (self.predicate)(event)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
