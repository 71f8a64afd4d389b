//! State machine that dispatches events through a hierarchical state graph.

use crate::core::{
    evaluate, Action, ActiveConfiguration, ConfigurationChange, Event, StateGraph, StateHistory,
    StateId, StateKind, StateNode, Transition,
};
use crate::runtime::config::MachineConfig;
use crate::runtime::error::MachineError;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// Result of dispatching one event.
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult {
    /// A transition fired at some level; `from` and `to` may be equal for
    /// self transitions.
    Transitioned {
        from: ActiveConfiguration,
        to: ActiveConfiguration,
    },

    /// No transition at any level accepted the event.
    Unhandled,
}

impl StepResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// A running instance over a shared [`StateGraph`].
///
/// The graph is immutable and may be shared by several machines. Each
/// machine owns the only mutable data: the root active pointer and the
/// active child of every composite state. Dispatch is synchronous and not
/// re-entrant; wrap a machine in a lock if several threads drive it.
pub struct StateMachine {
    name: String,
    graph: Arc<StateGraph>,
    active: Option<StateId>,
    children: Vec<Option<StateId>>,
    history: StateHistory,
    unmatched: VecDeque<Event>,
    config: MachineConfig,
}

impl StateMachine {
    /// Create a machine with no active state. Call [`activate`](Self::activate)
    /// or [`set_active_configuration`](Self::set_active_configuration) before use.
    pub fn new(name: impl Into<String>, graph: Arc<StateGraph>, config: MachineConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => StateHistory::with_limit(limit),
            None => StateHistory::new(),
        };
        Self {
            name: name.into(),
            children: vec![None; graph.len()],
            graph,
            active: None,
            history,
            unmatched: VecDeque::new(),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph(&self) -> &Arc<StateGraph> {
        &self.graph
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Fail unless a root active state has been established.
    pub fn validate(&self) -> Result<(), MachineError> {
        match self.active {
            Some(_) => Ok(()),
            None => Err(MachineError::NoActiveState),
        }
    }

    /// Root-level active state.
    pub fn active_state(&self) -> Option<&StateNode> {
        self.active.map(|id| self.graph.node(id))
    }

    pub fn active_state_id(&self) -> Option<StateId> {
        self.active
    }

    /// Name of the root-level active state.
    pub fn active_state_name(&self) -> Result<&str, MachineError> {
        self.active_state()
            .map(StateNode::name)
            .ok_or(MachineError::NoActiveState)
    }

    /// Active child of a composite state, if it has been entered.
    pub fn active_child(&self, composite: StateId) -> Option<StateId> {
        self.children.get(composite.index()).copied().flatten()
    }

    /// Active states from the root down to the leaf.
    pub fn active_chain(&self) -> Result<Vec<StateId>, MachineError> {
        let mut current = self.active.ok_or(MachineError::NoActiveState)?;
        let mut chain = vec![current];
        while self.graph.node(current).is_composite() {
            current = self.child_of(current)?;
            chain.push(current);
        }
        Ok(chain)
    }

    /// Records of handled events, oldest first.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub(crate) fn replace_history(&mut self, history: StateHistory) {
        self.history = history;
    }

    /// Events that matched no transition, oldest first.
    pub fn unmatched_events(&self) -> impl Iterator<Item = &Event> {
        self.unmatched.iter()
    }

    pub fn unmatched_count(&self) -> usize {
        self.unmatched.len()
    }

    /// Make a top-level state active and enter it.
    ///
    /// Entering a composite cascades through initial transitions down to a
    /// leaf. Entry actions receive [`Event::activation`].
    pub fn activate(&mut self, state: StateId) -> Result<(), MachineError> {
        if !self.graph.roots().contains(&state) {
            return Err(MachineError::NotARootState {
                id: state.to_string(),
            });
        }
        debug!(machine = %self.name, state = self.graph.node(state).name(), "activate");
        self.active = Some(state);
        self.enter(state, &Event::activation())
    }

    /// Dispatch an event.
    ///
    /// The active leaf sees the event first. Events it does not handle bubble
    /// outward through every enclosing composite. When a composite's region
    /// reaches a state that transitions to a final state, the composite's own
    /// transitions are evaluated against the completion event instead.
    ///
    /// For every transition taken, the transition action runs first, then the
    /// exit actions of the source (innermost first), then the entry actions of
    /// the target. Action failures abort the call; work already done is not
    /// rolled back.
    pub fn execute(&mut self, event: &Event) -> Result<StepResult, MachineError> {
        let active = self.active.ok_or(MachineError::NoActiveState)?;
        let from = self.active_configuration()?;
        debug!(
            machine = %self.name,
            active = self.graph.node(active).name(),
            event = event.name(),
            "execute"
        );

        let mut fired = false;
        if let Some(next) = self.dispatch(active, event, &mut fired)? {
            self.exit(active, event)?;
            self.active = Some(next);
            self.enter(next, event)?;
            debug!(machine = %self.name, state = self.graph.node(next).name(), "new active state");
        }

        if !fired {
            debug!(machine = %self.name, event = event.name(), "no transition matched");
            self.remember_unmatched(event);
            return Ok(StepResult::Unhandled);
        }

        let to = self.active_configuration()?;
        self.history.record(ConfigurationChange {
            from: from.clone(),
            to: to.clone(),
            event: event.name().to_string(),
            timestamp: Utc::now(),
        });
        Ok(StepResult::Transitioned { from, to })
    }

    fn remember_unmatched(&mut self, event: &Event) {
        if !self.config.track_unmatched || self.config.unmatched_limit == 0 {
            return;
        }
        while self.unmatched.len() >= self.config.unmatched_limit {
            self.unmatched.pop_front();
        }
        self.unmatched.push_back(event.clone());
    }

    pub(crate) fn child_of(&self, composite: StateId) -> Result<StateId, MachineError> {
        self.active_child(composite)
            .ok_or_else(|| MachineError::NoActiveChild {
                composite: self.graph.node(composite).name().to_string(),
            })
    }

    pub(crate) fn set_child(&mut self, composite: StateId, child: StateId) {
        self.children[composite.index()] = Some(child);
    }

    pub(crate) fn set_root(&mut self, state: StateId) {
        self.active = Some(state);
    }

    /// Evaluate `event` against `state` and return the state the caller
    /// should move to. Nested composites update their own active child.
    fn dispatch(
        &mut self,
        state: StateId,
        event: &Event,
        fired: &mut bool,
    ) -> Result<Option<StateId>, MachineError> {
        let graph = Arc::clone(&self.graph);
        let node = graph.node(state);

        match node.kind() {
            StateKind::Final => Err(MachineError::FinalStateDispatch {
                state: node.name().to_string(),
            }),
            StateKind::Simple => fire(node.transitions(), event, fired),
            StateKind::Composite(_) => {
                let child = self.child_of(state)?;
                match self.dispatch(child, event, fired)? {
                    Some(next) => {
                        self.exit(child, event)?;
                        self.set_child(state, next);
                        self.enter(next, event)?;
                        debug!(composite = node.name(), state = graph.node(next).name(), "new internal active state");

                        if graph.transitions_to_final(next) {
                            debug!(composite = node.name(), state = graph.node(next).name(), "region completed");
                            fire(node.transitions(), &Event::completion(), fired)
                        } else {
                            Ok(None)
                        }
                    }
                    None => fire(node.transitions(), event, fired),
                }
            }
        }
    }

    /// Run entry behavior: the state's entry action, then for composites the
    /// initial transition action and entry of the default child.
    pub(crate) fn enter(&mut self, state: StateId, event: &Event) -> Result<(), MachineError> {
        let graph = Arc::clone(&self.graph);
        let node = graph.node(state);
        perform(node.on_entry(), event)?;

        if let Some(region) = node.as_composite() {
            let initial = region.initial();
            perform(initial.on_fire(), event)?;
            self.set_child(state, initial.target());
            debug!(composite = node.name(), state = graph.node(initial.target()).name(), "initial transition");
            self.enter(initial.target(), event)?;
        }
        Ok(())
    }

    /// Run exit behavior, innermost active state first.
    fn exit(&mut self, state: StateId, event: &Event) -> Result<(), MachineError> {
        let graph = Arc::clone(&self.graph);
        let node = graph.node(state);

        if node.is_composite() {
            if let Some(child) = self.active_child(state) {
                self.exit(child, event)?;
            }
        }
        perform(node.on_exit(), event)
    }
}

/// Select and fire the first transition accepting `event`.
fn fire(
    transitions: &[Transition],
    event: &Event,
    fired: &mut bool,
) -> Result<Option<StateId>, MachineError> {
    let Some(transition) = evaluate(transitions, event) else {
        return Ok(None);
    };
    *fired = true;
    perform(transition.on_fire(), event)?;
    Ok(Some(transition.target()))
}

fn perform(action: Option<&Action>, event: &Event) -> Result<(), MachineError> {
    match action {
        Some(action) => action
            .perform(event)
            .map_err(|source| MachineError::Action {
                label: action.label().to_string(),
                source,
            }),
        None => Ok(()),
    }
}

impl std::fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name)
            .field("active", &self.active_configuration().ok())
            .finish_non_exhaustive()
    }
}
