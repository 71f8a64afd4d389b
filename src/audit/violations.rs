//! Findings reported by the graph audit and how to react to them.

use thiserror::Error;

/// Structural problems that a state graph can build with but that make
/// some dispatches fail or do nothing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphViolation {
    #[error("Name '{name}' is used by more than one state in {scope}; lookups resolve to the first")]
    DuplicateName { scope: String, name: String },

    #[error("Composite state '{composite}' can complete but has no completion transition")]
    UnhandledCompletion { composite: String },

    #[error("Initial transition of '{composite}' targets final state '{target}'")]
    InitialTargetIsFinal { composite: String, target: String },

    #[error("Transition from '{state}' enters final state '{target}' on an event other than completion; the region stops handling events there")]
    FinalTargetWithoutCompletion { state: String, target: String },
}

/// What a machine builder does when the audit reports findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditPolicy {
    /// Refuse to build the machine
    Reject,

    /// Build anyway but log every finding
    #[default]
    Warn,

    /// Do not audit
    Skip,
}
