//! State nodes of a hierarchical state graph.
//!
//! States come in three variants: simple leaves, composites that own a
//! nested region of internal states, and final markers that denote the end
//! of a region. Every state owns an ordered list of outgoing transitions and
//! optional entry/exit actions.

use super::action::Action;
use super::transition::Transition;
use std::fmt;

/// Handle of a state inside its [`StateGraph`](super::StateGraph).
///
/// Ids are only meaningful for the graph that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the state in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Nested region of a composite state.
#[derive(Debug)]
pub struct Region {
    states: Vec<StateId>,
    initial: Transition,
}

impl Region {
    pub(crate) fn new(states: Vec<StateId>, initial: Transition) -> Self {
        Self { states, initial }
    }

    /// Internal states in declaration order.
    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    /// Transition taken when the composite is entered without an explicit
    /// internal target.
    pub fn initial(&self) -> &Transition {
        &self.initial
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.states.contains(&id)
    }
}

/// Variant-specific part of a state.
#[derive(Debug)]
pub enum StateKind {
    /// Leaf state with no internal structure.
    Simple,
    /// State containing a nested region.
    Composite(Region),
    /// Terminal marker; never originates a transition.
    Final,
}

/// A declared state.
#[derive(Debug)]
pub struct StateNode {
    name: String,
    kind: StateKind,
    transitions: Vec<Transition>,
    on_entry: Option<Action>,
    on_exit: Option<Action>,
}

impl StateNode {
    pub(crate) fn new(
        name: String,
        kind: StateKind,
        transitions: Vec<Transition>,
        on_entry: Option<Action>,
        on_exit: Option<Action>,
    ) -> Self {
        Self {
            name,
            kind,
            transitions,
            on_entry,
            on_exit,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &StateKind {
        &self.kind
    }

    /// Outgoing transitions in declaration order. Always empty for final states.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn on_entry(&self) -> Option<&Action> {
        self.on_entry.as_ref()
    }

    pub fn on_exit(&self) -> Option<&Action> {
        self.on_exit.as_ref()
    }

    /// Capability query for composite states.
    pub fn as_composite(&self) -> Option<&Region> {
        match &self.kind {
            StateKind::Composite(region) => Some(region),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind, StateKind::Composite(_))
    }

    pub fn is_final(&self) -> bool {
        matches!(self.kind, StateKind::Final)
    }
}
