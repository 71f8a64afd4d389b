//! Immutable arena holding every declared state.

use super::event::Event;
use super::state::{StateId, StateNode};
use super::transition::evaluate;

/// The finished, read-only state graph.
///
/// States are stored in declaration order and addressed by [`StateId`].
/// `roots` lists the top-level scope; every composite lists its own scope in
/// its [`Region`](super::Region). A graph is built once by
/// [`GraphBuilder`](crate::builder::GraphBuilder) and may be shared by any
/// number of machines.
#[derive(Debug)]
pub struct StateGraph {
    nodes: Vec<StateNode>,
    roots: Vec<StateId>,
}

impl StateGraph {
    pub(crate) fn new(nodes: Vec<StateNode>, roots: Vec<StateId>) -> Self {
        Self { nodes, roots }
    }

    /// Look up a state. Returns `None` for ids issued by another graph.
    pub fn get(&self, id: StateId) -> Option<&StateNode> {
        self.nodes.get(id.index())
    }

    /// Look up a state whose id is known to belong to this graph.
    pub(crate) fn node(&self, id: StateId) -> &StateNode {
        &self.nodes[id.index()]
    }

    /// Top-level states in declaration order.
    pub fn roots(&self) -> &[StateId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All states with their ids, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, &StateNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (StateId::new(index), node))
    }

    /// Find a state by name within one scope.
    ///
    /// With duplicate names the first state in scope order wins.
    pub fn find_in(&self, scope: &[StateId], name: &str) -> Option<StateId> {
        scope
            .iter()
            .copied()
            .find(|id| self.node(*id).name() == name)
    }

    /// Find the first declared state with the given name, in any scope.
    pub fn find(&self, name: &str) -> Option<StateId> {
        self.iter()
            .find(|(_, node)| node.name() == name)
            .map(|(id, _)| id)
    }

    /// Check whether a state models the end of its region.
    ///
    /// True iff the first of the state's own transitions that accepts the
    /// completion event targets a final state. Nothing is fired.
    pub fn transitions_to_final(&self, id: StateId) -> bool {
        let completion = Event::completion();
        evaluate(self.node(id).transitions(), &completion)
            .is_some_and(|t| self.node(t.target()).is_final())
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{on_event, GraphBuilder};
    use crate::core::{Guard, Transition};

    #[test]
    fn transitions_to_final_requires_final_target() {
        let mut builder = GraphBuilder::new();
        let done = builder.final_state("Done");
        let other = builder.simple("Other");
        let closing = builder.simple("Closing");
        let looping = builder.simple("Looping");
        builder.transition(closing, Transition::new(Guard::completion(), done));
        builder.transition(looping, Transition::new(Guard::completion(), other));
        builder.root_states([done, other, closing, looping]);
        let graph = builder.build().unwrap();

        assert!(graph.transitions_to_final(closing));
        assert!(!graph.transitions_to_final(looping));
        assert!(!graph.transitions_to_final(done));
        assert!(!graph.transitions_to_final(other));
    }

    #[test]
    fn transitions_to_final_follows_declaration_order() {
        let mut builder = GraphBuilder::new();
        let done = builder.final_state("Done");
        let other = builder.simple("Other");
        let state = builder.simple("Transaction");
        builder.transition(state, Transition::new(Guard::always(), other));
        builder.transition(state, Transition::new(Guard::completion(), done));
        builder.root_states([state, other, done]);
        let graph = builder.build().unwrap();

        assert!(!graph.transitions_to_final(state));
    }

    #[test]
    fn catch_all_guard_counts_as_completion() {
        let mut builder = GraphBuilder::new();
        let done = builder.final_state("Final");
        let transaction = builder.simple("Transaction");
        builder.transition(transaction, Transition::new(Guard::always(), done));
        builder.root_states([transaction, done]);
        let graph = builder.build().unwrap();

        assert!(graph.transitions_to_final(transaction));
    }

    #[test]
    fn find_in_scope_returns_first_duplicate() {
        let mut builder = GraphBuilder::new();
        let first = builder.simple("Twin");
        let second = builder.simple("Twin");
        let target = builder.simple("Target");
        builder.transition(first, on_event("Go", target));
        builder.root_states([first, second, target]);
        let graph = builder.build().unwrap();

        assert_eq!(graph.find_in(graph.roots(), "Twin"), Some(first));
        assert_eq!(graph.find_in(&[second, first], "Twin"), Some(second));
        assert_eq!(graph.find_in(graph.roots(), "Missing"), None);
        assert_eq!(graph.find("Target"), Some(target));
        assert_eq!(graph.len(), 3);
        assert!(!graph.is_empty());
    }
}
