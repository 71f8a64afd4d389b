//! Runtime execution of state machines.
//!
//! A [`StateMachine`] pairs a shared, immutable [`StateGraph`](crate::core::StateGraph)
//! with the mutable pointers that make up its active configuration.

pub mod config;
pub mod configuration;
pub mod error;
pub mod machine;

pub use config::MachineConfig;
pub use error::MachineError;
pub use machine::{StateMachine, StepResult};
