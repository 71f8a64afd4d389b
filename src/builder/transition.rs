//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Action, Event, Guard, StateId, Transition};

/// Builder for constructing transitions with a fluent API.
///
/// Guard and target are mandatory; a transition missing either is rejected
/// by [`build`](Self::build), never at dispatch time.
#[derive(Debug, Default)]
pub struct TransitionBuilder {
    name: Option<String>,
    guard: Option<Guard>,
    target: Option<StateId>,
    action: Option<Action>,
}

impl TransitionBuilder {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transition name (optional).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the guard (required).
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Set the guard using a closure (required).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Event) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Guard on an event name.
    pub fn on(self, event: impl Into<String>) -> Self {
        self.guard(Guard::on(event))
    }

    /// Guard on the completion event.
    pub fn on_completion(self) -> Self {
        self.guard(Guard::completion())
    }

    /// Set the target state (required).
    pub fn to(mut self, target: StateId) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the action fired when the transition is taken (optional).
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition, BuildError> {
        let label = self.name.clone().unwrap_or_else(|| "<unnamed>".to_string());
        let guard = self.guard.ok_or_else(|| BuildError::MissingGuard {
            transition: label.clone(),
        })?;
        let target = self
            .target
            .ok_or(BuildError::MissingTarget { transition: label })?;

        let mut transition = Transition::new(guard, target);
        if let Some(name) = self.name {
            transition = transition.named(name);
        }
        if let Some(action) = self.action {
            transition = transition.with_action(action);
        }
        Ok(transition)
    }
}
