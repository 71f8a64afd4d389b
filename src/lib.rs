//! Composite FSM: a hierarchical state machine engine
//!
//! States are simple, final or composite. A composite state owns a region of
//! inner states with an initial transition, so machines nest to any depth.
//! An event is offered to the innermost active state first and bubbles
//! outward until a guard accepts it. When a region reaches a state that
//! completes into a final state, the enclosing composite reacts to the
//! completion event within the same dispatch.
//!
//! The graph is immutable and shared; each [`StateMachine`] owns only its
//! active pointers, which can be saved and restored as an
//! [`ActiveConfiguration`] (a root-to-leaf list of state names).
//!
//! # Core Concepts
//!
//! - **Graph**: states and transitions assembled with [`GraphBuilder`]
//! - **Guards**: predicates over the dispatched [`Event`]; the first match in
//!   declaration order wins
//! - **Actions**: fallible callbacks on transitions, entry and exit
//! - **Configuration**: the active path, readable and restorable by name
//! - **Checkpoints**: configuration plus history, as JSON or bincode
//!
//! # Example
//!
//! ```rust
//! use composite_fsm::builder::{completion, initial, on_event, GraphBuilder, StateMachineBuilder};
//! use composite_fsm::core::{Event, Guard, Transition};
//!
//! let mut graph = GraphBuilder::new();
//! let idle = graph.simple("Idle");
//! let auth = graph.simple("Authentication");
//! let selecting = graph.simple("SelectingTransaction");
//! let transaction = graph.simple("Transaction");
//! let done = graph.final_state("Final");
//! let serving = graph.composite("ServingCustomer", [auth, selecting, transaction, done]);
//!
//! graph.initial_transition(serving, initial(auth));
//! graph.transition(idle, on_event("CardInserted", serving));
//! graph.transition(auth, on_event("Authenticated", selecting));
//! graph.transition(selecting, on_event("TransactionSelected", transaction));
//! graph.transition(transaction, Transition::new(Guard::always(), done));
//! graph.transition(serving, completion(idle));
//! graph.root_states([idle, serving]);
//!
//! let mut atm = StateMachineBuilder::new("ATM")
//!     .graph(graph.build().unwrap())
//!     .initial(idle)
//!     .build()
//!     .unwrap();
//!
//! atm.execute(&Event::new("CardInserted")).unwrap();
//! atm.execute(&Event::new("Authenticated")).unwrap();
//! assert_eq!(
//!     atm.active_configuration().unwrap(),
//!     ["ServingCustomer", "SelectingTransaction"]
//! );
//!
//! // Transaction completes the region, so ServingCustomer leaves at once.
//! atm.execute(&Event::new("TransactionSelected")).unwrap();
//! assert_eq!(atm.active_configuration().unwrap(), ["Idle"]);
//! ```

pub mod audit;
pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod dot;
pub mod runtime;

// Re-export commonly used types
pub use builder::{BuildError, GraphBuilder, StateMachineBuilder, TransitionBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use core::{Action, ActiveConfiguration, Event, Guard, StateGraph, StateId, Transition};
pub use runtime::{MachineConfig, MachineError, StateMachine, StepResult};
