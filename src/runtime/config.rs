//! Runtime options of a state machine instance.

use serde::{Deserialize, Serialize};

/// Options controlling the diagnostics a machine keeps.
///
/// Missing fields fall back to their defaults when deserialized, so a
/// partial JSON document is a valid configuration.
///
/// # Example
///
/// ```rust
/// use composite_fsm::runtime::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "history_limit": 10 }"#).unwrap();
///
/// assert_eq!(config.history_limit, Some(10));
/// assert!(config.track_unmatched);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Maximum number of history entries kept; `None` keeps everything.
    pub history_limit: Option<usize>,

    /// Whether events that matched no transition are recorded.
    pub track_unmatched: bool,

    /// Maximum number of unmatched events kept.
    pub unmatched_limit: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            history_limit: Some(50),
            track_unmatched: true,
            unmatched_limit: 50,
        }
    }
}

impl MachineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_unmatched_tracking(mut self, enabled: bool) -> Self {
        self.track_unmatched = enabled;
        self
    }
}
