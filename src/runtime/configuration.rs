//! Reading and restoring the active state configuration.

use crate::core::{ActiveConfiguration, StateId};
use crate::runtime::error::MachineError;
use crate::runtime::machine::StateMachine;
use tracing::debug;

impl StateMachine {
    /// Names of the active states from the root down to the leaf.
    ///
    /// ```rust
    /// use composite_fsm::builder::{on_event, GraphBuilder, StateMachineBuilder};
    /// use composite_fsm::core::Event;
    ///
    /// let mut graph = GraphBuilder::new();
    /// let off_hook = graph.simple("OffHook");
    /// let ringing = graph.simple("Ringing");
    /// graph.transition(off_hook, on_event("CallDialed", ringing));
    /// graph.root_states([off_hook, ringing]);
    ///
    /// let mut machine = StateMachineBuilder::new("Phone")
    ///     .graph(graph.build().unwrap())
    ///     .initial(off_hook)
    ///     .build()
    ///     .unwrap();
    ///
    /// machine.execute(&Event::new("CallDialed")).unwrap();
    /// assert_eq!(machine.active_configuration().unwrap(), ["Ringing"]);
    /// ```
    pub fn active_configuration(&self) -> Result<ActiveConfiguration, MachineError> {
        let graph = self.graph();
        Ok(self
            .active_chain()?
            .into_iter()
            .map(|id| graph.node(id).name().to_string())
            .collect())
    }

    /// Restore the active configuration from a root-to-leaf list of names.
    ///
    /// Each name is looked up among the states of the enclosing scope. A path
    /// that stops at a composite state continues through the default initial
    /// targets. No entry, exit or transition actions run, and the machine is
    /// left untouched when the path cannot be resolved.
    pub fn set_active_configuration<I, S>(&mut self, names: I) -> Result<(), MachineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names.into_iter().map(|s| s.as_ref().to_string()).collect();
        let path = self.resolve(&names)?;
        debug!(machine = %self.name(), configuration = ?names, "restoring configuration");
        self.apply(&path);
        Ok(())
    }

    /// Resolve names into state ids, descending defaults past the last name.
    fn resolve(&self, names: &[String]) -> Result<Vec<StateId>, MachineError> {
        let graph = self.graph();
        let (first, rest) = names.split_first().ok_or(MachineError::EmptyConfiguration)?;

        let mut current = graph
            .find_in(graph.roots(), first)
            .ok_or_else(|| MachineError::UnknownStateName {
                name: first.clone(),
                scope: "top-level states".to_string(),
            })?;
        let mut path = vec![current];

        for (position, name) in rest.iter().enumerate() {
            let node = graph.node(current);
            let region = node
                .as_composite()
                .ok_or_else(|| MachineError::TrailingConfiguration {
                    state: node.name().to_string(),
                    remaining: rest[position..].to_vec(),
                })?;
            current = graph.find_in(region.states(), name).ok_or_else(|| {
                MachineError::UnknownStateName {
                    name: name.clone(),
                    scope: format!("composite state '{}'", node.name()),
                }
            })?;
            path.push(current);
        }

        while let Some(region) = graph.node(current).as_composite() {
            current = region.initial().target();
            path.push(current);
        }
        Ok(path)
    }

    fn apply(&mut self, path: &[StateId]) {
        let Some((root, _)) = path.split_first() else {
            return;
        };
        self.set_root(*root);
        for pair in path.windows(2) {
            self.set_child(pair[0], pair[1]);
        }
    }
}
