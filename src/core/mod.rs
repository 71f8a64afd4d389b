//! Core state graph types.
//!
//! This module contains the immutable data model of the engine:
//! - Events, guards and actions
//! - Transitions and the declaration-order evaluation rule
//! - Simple, composite and final states stored in a shared arena
//! - The active-configuration path and transition history
//!
//! Nothing in this module mutates a running machine; the mutable active
//! pointers live in [`crate::runtime::StateMachine`].

mod action;
mod configuration;
mod event;
mod graph;
mod guard;
mod history;
mod state;
mod transition;

pub use action::{Action, ActionError, ActionFn};
pub use configuration::ActiveConfiguration;
pub use event::{Event, ACTIVATION_EVENT, COMPLETION_EVENT};
pub use graph::StateGraph;
pub use guard::Guard;
pub use history::{ConfigurationChange, StateHistory};
pub use state::{Region, StateId, StateKind, StateNode};
pub use transition::{evaluate, Transition};
