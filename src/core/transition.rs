//! Guarded transitions and the shared evaluation rule.

use super::action::Action;
use super::event::Event;
use super::guard::Guard;
use super::state::StateId;

/// An edge from a state to a target state.
///
/// A transition owns a mandatory guard and a mandatory target; the name and
/// the action are optional. Transitions are immutable once built.
#[derive(Debug)]
pub struct Transition {
    name: Option<String>,
    guard: Guard,
    target: StateId,
    on_fire: Option<Action>,
}

impl Transition {
    /// Create an unnamed transition without action.
    pub fn new(guard: Guard, target: StateId) -> Self {
        Self {
            name: None,
            guard,
            target,
            on_fire: None,
        }
    }

    /// Set the transition name used in diagnostics and graph export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the action fired when the transition is taken.
    pub fn with_action(mut self, action: Action) -> Self {
        self.on_fire = Some(action);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn target(&self) -> StateId {
        self.target
    }

    pub fn on_fire(&self) -> Option<&Action> {
        self.on_fire.as_ref()
    }

    /// Check the guard against an event (pure).
    pub fn accepts(&self, event: &Event) -> bool {
        self.guard.check(event)
    }
}

/// Select the transition that handles `event`.
///
/// Transitions are scanned in declaration order and the first one whose
/// guard accepts the event wins; later matches are never considered.
pub fn evaluate<'a>(transitions: &'a [Transition], event: &Event) -> Option<&'a Transition> {
    transitions.iter().find(|t| t.accepts(event))
}
