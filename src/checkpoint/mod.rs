//! Checkpoint and resume functionality for state machines.
//!
//! A checkpoint captures where a machine is, not what it is: the active
//! configuration as a list of state names plus the transition history.
//! Guards and actions never leave the process. Resuming requires a machine
//! built over an equivalent graph.

use crate::core::{ActiveConfiguration, StateHistory};
use crate::runtime::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of a state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Name of the machine the checkpoint was taken from
    pub machine: String,

    /// Active configuration, root first
    pub configuration: ActiveConfiguration,

    /// Transition history at capture time
    pub history: StateHistory,
}

impl Checkpoint {
    /// Capture a running machine.
    pub fn capture(machine: &StateMachine) -> Result<Self, CheckpointError> {
        Ok(Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            machine: machine.name().to_string(),
            configuration: machine.active_configuration()?,
            history: machine.history().clone(),
        })
    }

    /// Check version and content before the checkpoint is applied.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if self.configuration.is_empty() {
            return Err(CheckpointError::ValidationFailed(
                "active configuration is empty".to_string(),
            ));
        }
        if self.id.is_nil() {
            return Err(CheckpointError::ValidationFailed(
                "checkpoint id is nil".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}

impl StateMachine {
    /// Capture the current configuration and history.
    pub fn checkpoint(&self) -> Result<Checkpoint, CheckpointError> {
        Checkpoint::capture(self)
    }

    /// Restore configuration and history from a checkpoint.
    ///
    /// The checkpoint must come from a machine with the same name. Like
    /// [`set_active_configuration`](Self::set_active_configuration), no
    /// actions run and nothing changes when the checkpoint is rejected.
    pub fn resume(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        checkpoint.validate()?;
        if checkpoint.machine != self.name() {
            return Err(CheckpointError::MachineMismatch {
                expected: self.name().to_string(),
                found: checkpoint.machine.clone(),
            });
        }

        self.set_active_configuration(checkpoint.configuration.iter())?;
        self.replace_history(checkpoint.history.clone());
        debug!(machine = %self.name(), checkpoint = %checkpoint.id, "resumed from checkpoint");
        Ok(())
    }
}
