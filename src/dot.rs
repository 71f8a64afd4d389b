//! Graphviz DOT export of state graphs.

use crate::core::{StateGraph, StateId, StateKind, Transition};
use crate::runtime::StateMachine;

/// Render a graph in DOT notation.
///
/// Every declared state becomes one node, labelled with its name. Each
/// transition becomes an edge labelled with the transition name when it has
/// one; initial transitions of composite states are drawn dashed. `active`
/// marks a leaf state to highlight.
pub fn render(graph: &StateGraph, name: &str, active: Option<StateId>) -> String {
    let mut out = format!("digraph \"{}\" {{\n", escape(name));

    for (id, node) in graph.iter() {
        let mut attrs = vec![format!("label=\"{}\"", escape(node.name()))];
        match node.kind() {
            StateKind::Composite(_) => attrs.push("style=filled, fillcolor=lightgrey".to_string()),
            StateKind::Final => attrs.push("shape=doublecircle".to_string()),
            StateKind::Simple => {}
        }
        if active == Some(id) {
            attrs.push("style=filled, fillcolor=lightblue".to_string());
        }
        out.push_str(&format!("  {} [{}];\n", node_id(id), attrs.join(", ")));
    }

    for (id, node) in graph.iter() {
        if let Some(region) = node.as_composite() {
            out.push_str(&edge(id, region.initial(), Some("style=dashed")));
        }
        for transition in node.transitions() {
            out.push_str(&edge(id, transition, None));
        }
    }

    out.push_str("}\n");
    out
}

fn edge(from: StateId, transition: &Transition, style: Option<&str>) -> String {
    let mut attrs = Vec::new();
    if let Some(name) = transition.name() {
        attrs.push(format!("label=\"{}\"", escape(name)));
    }
    attrs.extend(style.map(str::to_string));

    if attrs.is_empty() {
        format!("  {} -> {};\n", node_id(from), node_id(transition.target()))
    } else {
        format!(
            "  {} -> {} [{}];\n",
            node_id(from),
            node_id(transition.target()),
            attrs.join(", ")
        )
    }
}

fn node_id(id: StateId) -> String {
    format!("s{}", id.index())
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

impl StateMachine {
    /// Render this machine's graph, optionally highlighting the active leaf.
    pub fn to_dot(&self, show_active: bool) -> String {
        let active = if show_active {
            self.active_chain().ok().and_then(|chain| chain.last().copied())
        } else {
            None
        };
        render(self.graph(), self.name(), active)
    }
}
