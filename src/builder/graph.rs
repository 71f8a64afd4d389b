//! Builder for assembling a state graph.

use crate::builder::error::BuildError;
use crate::core::{Action, Region, StateGraph, StateId, StateKind, StateNode, Transition};

#[derive(Debug)]
enum PendingKind {
    Simple,
    Final,
    Composite {
        states: Vec<StateId>,
        initial: Option<Transition>,
    },
}

#[derive(Debug)]
struct PendingState {
    name: String,
    kind: PendingKind,
    transitions: Vec<Transition>,
    initial: Option<Transition>,
    on_entry: Option<Action>,
    on_exit: Option<Action>,
}

/// Assembles states and transitions into an immutable [`StateGraph`].
///
/// States are declared first and receive a [`StateId`]; transitions may
/// then reference any declared state, which allows cycles such as
/// `Idle -> ServingCustomer -> Idle`. Transitions are appended in call
/// order, which is the order the engine evaluates them in.
///
/// # Example
///
/// ```rust
/// use composite_fsm::builder::{on_event, GraphBuilder};
///
/// let mut builder = GraphBuilder::new();
/// let off_hook = builder.simple("OffHook");
/// let ringing = builder.simple("Ringing");
/// builder.transition(off_hook, on_event("CallDialed", ringing).named("CallDial"));
/// builder.transition(ringing, on_event("HungUp", off_hook).named("HangUp"));
/// builder.root_states([off_hook, ringing]);
///
/// let graph = builder.build().unwrap();
/// assert_eq!(graph.roots().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    states: Vec<PendingState>,
    roots: Vec<StateId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn declare(&mut self, name: impl Into<String>, kind: PendingKind) -> StateId {
        let id = StateId::new(self.states.len());
        self.states.push(PendingState {
            name: name.into(),
            kind,
            transitions: Vec::new(),
            initial: None,
            on_entry: None,
            on_exit: None,
        });
        id
    }

    /// Declare a simple state.
    pub fn simple(&mut self, name: impl Into<String>) -> StateId {
        self.declare(name, PendingKind::Simple)
    }

    /// Declare a final state.
    pub fn final_state(&mut self, name: impl Into<String>) -> StateId {
        self.declare(name, PendingKind::Final)
    }

    /// Declare a composite state owning `internal` as its region.
    ///
    /// The initial transition is supplied separately with
    /// [`initial_transition`](Self::initial_transition).
    pub fn composite<I>(&mut self, name: impl Into<String>, internal: I) -> StateId
    where
        I: IntoIterator<Item = StateId>,
    {
        self.declare(
            name,
            PendingKind::Composite {
                states: internal.into_iter().collect(),
                initial: None,
            },
        )
    }

    /// Append an outgoing transition to `from`.
    pub fn transition(&mut self, from: StateId, transition: Transition) -> &mut Self {
        if let Some(state) = self.states.get_mut(from.index()) {
            state.transitions.push(transition);
        } else {
            self.orphan(from);
        }
        self
    }

    /// Append several outgoing transitions to `from`, keeping their order.
    pub fn transitions<I>(&mut self, from: StateId, transitions: I) -> &mut Self
    where
        I: IntoIterator<Item = Transition>,
    {
        for transition in transitions {
            self.transition(from, transition);
        }
        self
    }

    /// Set the initial transition of a composite state.
    pub fn initial_transition(&mut self, composite: StateId, transition: Transition) -> &mut Self {
        match self.states.get_mut(composite.index()) {
            Some(PendingState {
                kind: PendingKind::Composite { initial, .. },
                ..
            }) => *initial = Some(transition),
            Some(state) => state.initial = Some(transition),
            None => self.orphan(composite),
        }
        self
    }

    pub fn on_entry(&mut self, state: StateId, action: Action) -> &mut Self {
        match self.states.get_mut(state.index()) {
            Some(pending) => pending.on_entry = Some(action),
            None => self.orphan(state),
        }
        self
    }

    pub fn on_exit(&mut self, state: StateId, action: Action) -> &mut Self {
        match self.states.get_mut(state.index()) {
            Some(pending) => pending.on_exit = Some(action),
            None => self.orphan(state),
        }
        self
    }

    /// Append states to the top-level scope.
    pub fn root_states<I>(&mut self, states: I) -> &mut Self
    where
        I: IntoIterator<Item = StateId>,
    {
        self.roots.extend(states);
        self
    }

    // Foreign ids are remembered as roots so that build() reports them.
    fn orphan(&mut self, id: StateId) {
        self.roots.push(id);
    }

    fn check_known(&self, id: StateId) -> Result<(), BuildError> {
        if id.index() < self.states.len() {
            Ok(())
        } else {
            Err(BuildError::UnknownState { id: id.to_string() })
        }
    }

    fn name_of(&self, id: StateId) -> String {
        self.states[id.index()].name.clone()
    }

    // The top level plus every composite's region.
    fn scopes(&self) -> Vec<&[StateId]> {
        let regions = self.states.iter().filter_map(|state| match &state.kind {
            PendingKind::Composite { states, .. } => Some(states.as_slice()),
            _ => None,
        });
        std::iter::once(self.roots.as_slice()).chain(regions).collect()
    }

    // A transition must stay inside a scope that holds its source. States
    // listed in no scope can never become active and are skipped.
    fn check_scopes(&self) -> Result<(), BuildError> {
        let scopes = self.scopes();
        for (index, state) in self.states.iter().enumerate() {
            let id = StateId::new(index);
            let enclosing: Vec<_> = scopes.iter().filter(|scope| scope.contains(&id)).collect();
            if enclosing.is_empty() {
                continue;
            }
            for transition in &state.transitions {
                let target = transition.target();
                if !enclosing.iter().any(|scope| scope.contains(&target)) {
                    return Err(BuildError::TransitionLeavesScope {
                        state: state.name.clone(),
                        target: self.name_of(target),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate and freeze the graph.
    ///
    /// Besides ids and state kinds, every transition must target a state in
    /// the scope that holds its source: the top level, or the enclosing
    /// composite's region.
    pub fn build(self) -> Result<StateGraph, BuildError> {
        for id in &self.roots {
            self.check_known(*id)?;
        }

        for (index, state) in self.states.iter().enumerate() {
            let id = StateId::new(index);
            for transition in &state.transitions {
                self.check_known(transition.target())?;
            }

            match &state.kind {
                PendingKind::Final if !state.transitions.is_empty() => {
                    return Err(BuildError::FinalStateHasTransitions {
                        state: state.name.clone(),
                    });
                }
                PendingKind::Simple | PendingKind::Final => {
                    if state.initial.is_some() {
                        return Err(BuildError::NotComposite {
                            state: state.name.clone(),
                        });
                    }
                }
                PendingKind::Composite { states, initial } => {
                    for internal in states {
                        self.check_known(*internal)?;
                    }
                    if states.contains(&id) {
                        return Err(BuildError::SelfContainment {
                            state: state.name.clone(),
                        });
                    }
                    let initial =
                        initial
                            .as_ref()
                            .ok_or_else(|| BuildError::MissingInitialTransition {
                                state: state.name.clone(),
                            })?;
                    self.check_known(initial.target())?;
                    if !states.contains(&initial.target()) {
                        return Err(BuildError::InitialTargetOutsideRegion {
                            composite: state.name.clone(),
                            target: self.name_of(initial.target()),
                        });
                    }
                }
            }
        }

        self.check_scopes()?;

        let nodes = self
            .states
            .into_iter()
            .map(|state| {
                let kind = match state.kind {
                    PendingKind::Simple => StateKind::Simple,
                    PendingKind::Final => StateKind::Final,
                    PendingKind::Composite { states, initial } => {
                        let initial = initial.ok_or_else(|| BuildError::MissingInitialTransition {
                            state: state.name.clone(),
                        })?;
                        StateKind::Composite(Region::new(states, initial))
                    }
                };
                Ok(StateNode::new(
                    state.name,
                    kind,
                    state.transitions,
                    state.on_entry,
                    state.on_exit,
                ))
            })
            .collect::<Result<Vec<_>, BuildError>>()?;

        Ok(StateGraph::new(nodes, self.roots))
    }
}
