//! Builder for constructing state machines.

use crate::audit::{audit, AuditPolicy};
use crate::builder::error::BuildError;
use crate::core::{StateGraph, StateId};
use crate::runtime::{MachineConfig, StateMachine};
use std::sync::Arc;
use stillwater::validation::Validation;
use tracing::warn;

/// Builder for constructing state machines with a fluent API.
///
/// The graph and the initial top-level state are required. The returned
/// machine has already entered its initial state.
#[derive(Debug)]
pub struct StateMachineBuilder {
    name: String,
    graph: Option<Arc<StateGraph>>,
    initial: Option<StateId>,
    config: MachineConfig,
    audit: AuditPolicy,
}

impl StateMachineBuilder {
    /// Create a new builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: None,
            initial: None,
            config: MachineConfig::default(),
            audit: AuditPolicy::default(),
        }
    }

    /// Set the state graph (required). Accepts an owned graph or a shared one.
    pub fn graph(mut self, graph: impl Into<Arc<StateGraph>>) -> Self {
        self.graph = Some(graph.into());
        self
    }

    /// Set the initial top-level state (required).
    pub fn initial(mut self, state: StateId) -> Self {
        self.initial = Some(state);
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Choose how audit findings are handled. Defaults to [`AuditPolicy::Warn`].
    pub fn audit(mut self, policy: AuditPolicy) -> Self {
        self.audit = policy;
        self
    }

    /// Build and activate the state machine.
    pub fn build(self) -> Result<StateMachine, BuildError> {
        let graph = self.graph.ok_or(BuildError::MissingGraph)?;
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.audit != AuditPolicy::Skip {
            if let Validation::Failure(findings) = audit(&graph) {
                if self.audit == AuditPolicy::Reject {
                    return Err(BuildError::Audit(findings.iter().cloned().collect()));
                }
                for finding in findings.iter() {
                    warn!(machine = %self.name, "{}", finding);
                }
            }
        }

        let mut machine = StateMachine::new(self.name, graph, self.config);
        machine.activate(initial)?;
        machine.validate()?;
        Ok(machine)
    }
}
