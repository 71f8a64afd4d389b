//! Audit rules for state graphs using Validation.

use crate::audit::violations::GraphViolation;
use crate::core::{Event, StateGraph, StateId};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of an audit: success, or every finding.
pub type AuditResult = Validation<(), NonEmptyVec<GraphViolation>>;

/// Audit a graph, accumulating ALL findings.
///
/// Returns `Validation::Success(())` for a clean graph, otherwise every
/// violation found across all scopes.
pub fn audit(graph: &StateGraph) -> AuditResult {
    let mut checks: Vec<AuditResult> = Vec::new();

    checks.extend(unique_names(graph, graph.roots(), "top-level states"));

    for (id, node) in graph.iter() {
        checks.extend(final_entered_on_completion(graph, id));
        let Some(region) = node.as_composite() else {
            continue;
        };
        let scope = format!("composite state '{}'", node.name());
        checks.extend(unique_names(graph, region.states(), &scope));
        checks.push(initial_not_final(graph, id));
        checks.push(completion_handled(graph, id));
    }

    Validation::all_vec(checks).map(|_| ())
}

fn unique_names(graph: &StateGraph, scope: &[StateId], label: &str) -> Vec<AuditResult> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    scope
        .iter()
        .filter_map(|id| graph.get(*id))
        .filter(|node| !seen.insert(node.name()) && reported.insert(node.name()))
        .map(|node| {
            Validation::fail(GraphViolation::DuplicateName {
                scope: label.to_string(),
                name: node.name().to_string(),
            })
        })
        .collect()
}

// Only a completion-accepting guard lets the enclosing composite move on
// in the same dispatch.
fn final_entered_on_completion(graph: &StateGraph, state: StateId) -> Vec<AuditResult> {
    let node = graph.node(state);
    node.transitions()
        .iter()
        .filter(|t| graph.node(t.target()).is_final() && !t.accepts(&Event::completion()))
        .map(|t| {
            Validation::fail(GraphViolation::FinalTargetWithoutCompletion {
                state: node.name().to_string(),
                target: graph.node(t.target()).name().to_string(),
            })
        })
        .collect()
}

fn initial_not_final(graph: &StateGraph, composite: StateId) -> AuditResult {
    let node = graph.node(composite);
    let Some(region) = node.as_composite() else {
        return Validation::success(());
    };
    let target = graph.node(region.initial().target());
    if target.is_final() {
        Validation::fail(GraphViolation::InitialTargetIsFinal {
            composite: node.name().to_string(),
            target: target.name().to_string(),
        })
    } else {
        Validation::success(())
    }
}

fn completion_handled(graph: &StateGraph, composite: StateId) -> AuditResult {
    let node = graph.node(composite);
    let Some(region) = node.as_composite() else {
        return Validation::success(());
    };
    let completes = region
        .states()
        .iter()
        .any(|id| graph.transitions_to_final(*id));
    let handled = node
        .transitions()
        .iter()
        .any(|t| t.accepts(&Event::completion()));

    if completes && !handled {
        Validation::fail(GraphViolation::UnhandledCompletion {
            composite: node.name().to_string(),
        })
    } else {
        Validation::success(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{completion, initial, on_event, GraphBuilder};
    use crate::core::{Guard, Transition};

    #[test]
    fn clean_graph_passes() {
        let mut builder = GraphBuilder::new();
        let idle = builder.simple("Idle");
        let done = builder.final_state("Final");
        let auth = builder.simple("Authentication");
        let serving = builder.composite("ServingCustomer", [auth, done]);
        builder.initial_transition(serving, initial(auth));
        builder.transition(auth, completion(done));
        builder.transition(serving, completion(idle));
        builder.transition(idle, on_event("CardInserted", serving));
        builder.root_states([idle, serving]);

        assert!(audit(&builder.build().unwrap()).is_success());
    }

    #[test]
    fn event_transition_into_final_state_is_reported() {
        let mut builder = GraphBuilder::new();
        let idle = builder.simple("Idle");
        let working = builder.simple("Working");
        let done = builder.final_state("Done");
        let job = builder.composite("Job", [working, done]);
        builder.initial_transition(job, initial(working));
        builder.transition(working, on_event("Finish", done));
        builder.transition(job, completion(idle));
        builder.transition(job, on_event("Abort", idle));
        builder.transition(idle, on_event("Start", job));
        builder.root_states([idle, job]);

        match audit(&builder.build().unwrap()) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.iter().all(|e| matches!(
                    e,
                    GraphViolation::FinalTargetWithoutCompletion { state, target }
                        if state == "Working" && target == "Done"
                )));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn unconditional_transition_into_final_state_passes() {
        let mut builder = GraphBuilder::new();
        let idle = builder.simple("Idle");
        let working = builder.simple("Working");
        let done = builder.final_state("Done");
        let job = builder.composite("Job", [working, done]);
        builder.initial_transition(job, initial(working));
        builder.transition(working, Transition::new(Guard::always(), done));
        builder.transition(job, completion(idle));
        builder.root_states([idle, job]);

        assert!(audit(&builder.build().unwrap()).is_success());
    }

    #[test]
    fn audit_accumulates_all_violations() {
        let mut builder = GraphBuilder::new();
        let first = builder.simple("Twin");
        let second = builder.simple("Twin");
        let done = builder.final_state("Done");
        let leaving = builder.simple("Leaving");
        let outer = builder.composite("Outer", [done, leaving]);
        builder.initial_transition(outer, initial(done));
        builder.transition(leaving, completion(done));
        builder.root_states([first, second, outer]);

        match audit(&builder.build().unwrap()) {
            Validation::Failure(errors) => {
                let has = |f: fn(&GraphViolation) -> bool| errors.iter().any(f);
                assert!(has(|e| matches!(e, GraphViolation::DuplicateName { name, .. } if name == "Twin")));
                assert!(has(|e| matches!(e, GraphViolation::InitialTargetIsFinal { .. })));
                assert!(has(|e| matches!(e, GraphViolation::UnhandledCompletion { composite } if composite == "Outer")));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn duplicate_names_are_reported_once_per_scope() {
        let mut builder = GraphBuilder::new();
        let a = builder.simple("Same");
        let b = builder.simple("Same");
        let c = builder.simple("Same");
        builder.root_states([a, b, c]);

        match audit(&builder.build().unwrap()) {
            Validation::Failure(errors) => assert_eq!(errors.len(), 1),
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }
}
