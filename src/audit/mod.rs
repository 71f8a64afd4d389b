//! Structural audit of state graphs.
//!
//! [`GraphBuilder::build`](crate::builder::GraphBuilder::build) rejects graphs
//! the engine cannot run at all. The audit looks for graphs that run but
//! misbehave: ambiguous names, completions nobody handles and initial
//! transitions into final states. It uses
//! Stillwater's `Validation` so that every finding is reported in one pass.
//!
//! # Example
//!
//! ```rust
//! use composite_fsm::audit::{audit, GraphViolation};
//! use composite_fsm::builder::GraphBuilder;
//!
//! let mut builder = GraphBuilder::new();
//! let a = builder.simple("Idle");
//! let b = builder.simple("Idle");
//! builder.root_states([a, b]);
//!
//! let findings = audit(&builder.build().unwrap());
//! assert!(findings.is_failure());
//! ```

pub mod rules;
pub mod violations;

pub use rules::{audit, AuditResult};
pub use violations::{AuditPolicy, GraphViolation};
