//! Transition history tracking.
//!
//! Keeps an ordered, optionally bounded record of how a machine's active
//! configuration changed over time.

use super::configuration::ActiveConfiguration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of one handled event.
///
/// # Example
///
/// ```rust
/// use composite_fsm::core::{ActiveConfiguration, ConfigurationChange};
/// use chrono::Utc;
///
/// let change = ConfigurationChange {
///     from: ActiveConfiguration::from(vec!["Idle"]),
///     to: ActiveConfiguration::from(vec!["ServingCustomer", "Authentication"]),
///     event: "CardInserted".to_string(),
///     timestamp: Utc::now(),
/// };
///
/// assert!(change.changed());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationChange {
    /// Active configuration before the event
    pub from: ActiveConfiguration,
    /// Active configuration after the event
    pub to: ActiveConfiguration,
    /// Name of the event that was handled
    pub event: String,
    /// When the event was handled
    pub timestamp: DateTime<Utc>,
}

impl ConfigurationChange {
    /// False for self transitions that leave the path unchanged.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Ordered history of configuration changes.
///
/// With a limit set, the oldest entries are dropped once the limit is
/// reached.
///
/// # Example
///
/// ```rust
/// use composite_fsm::core::{ActiveConfiguration, ConfigurationChange, StateHistory};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// history.record(ConfigurationChange {
///     from: ActiveConfiguration::from(vec!["OffHook"]),
///     to: ActiveConfiguration::from(vec!["Ringing"]),
///     event: "CallDialed".to_string(),
///     timestamp: Utc::now(),
/// });
/// history.record(ConfigurationChange {
///     from: ActiveConfiguration::from(vec!["Ringing"]),
///     to: ActiveConfiguration::from(vec!["Connected"]),
///     event: "CallConnected".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // OffHook -> Ringing -> Connected
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    changes: VecDeque<ConfigurationChange>,
    limit: Option<usize>,
}

impl StateHistory {
    /// Create an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history keeping at most `limit` entries.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            changes: VecDeque::new(),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append a change, evicting the oldest entry when full.
    pub fn record(&mut self, change: ConfigurationChange) {
        if self.limit == Some(0) {
            return;
        }
        if let Some(limit) = self.limit {
            while self.changes.len() >= limit {
                self.changes.pop_front();
            }
        }
        self.changes.push_back(change);
    }

    /// Get the configurations traversed: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&ActiveConfiguration> {
        let mut path = Vec::new();
        if let Some(first) = self.changes.front() {
            path.push(&first.from);
        }
        for change in &self.changes {
            path.push(&change.to);
        }
        path
    }

    /// Time between the first and last recorded change.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.changes.front(), self.changes.back()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    pub fn changes(&self) -> impl Iterator<Item = &ConfigurationChange> {
        self.changes.iter()
    }

    pub fn last(&self) -> Option<&ConfigurationChange> {
        self.changes.back()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(from: &str, to: &str, event: &str) -> ConfigurationChange {
        ConfigurationChange {
            from: ActiveConfiguration::from(vec![from]),
            to: ActiveConfiguration::from(vec![to]),
            event: event.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn get_path_returns_configuration_sequence() {
        let mut history = StateHistory::new();
        history.record(change("Off", "SelfTest", "TurnedOn"));
        history.record(change("SelfTest", "Idle", "TestedOk"));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(*path[0], ["Off"]);
        assert_eq!(*path[1], ["SelfTest"]);
        assert_eq!(*path[2], ["Idle"]);
        assert_eq!(history.last().unwrap().event, "TestedOk");
    }

    #[test]
    fn limit_evicts_oldest() {
        let mut history = StateHistory::with_limit(2);
        history.record(change("A", "B", "1"));
        history.record(change("B", "C", "2"));
        history.record(change("C", "D", "3"));

        assert_eq!(history.len(), 2);
        let events: Vec<&str> = history.changes().map(|c| c.event.as_str()).collect();
        assert_eq!(events, vec!["2", "3"]);
    }

    #[test]
    fn zero_limit_records_nothing() {
        let mut history = StateHistory::with_limit(0);
        history.record(change("A", "B", "1"));
        assert!(history.is_empty());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        let start = Utc::now();
        history.record(ConfigurationChange {
            timestamp: start,
            ..change("A", "B", "1")
        });
        history.record(ConfigurationChange {
            timestamp: start + chrono::Duration::milliseconds(10),
            ..change("B", "C", "2")
        });

        assert_eq!(
            history.duration(),
            Some(std::time::Duration::from_millis(10))
        );
    }

    #[test]
    fn self_transition_is_not_a_change() {
        assert!(!change("Connected", "Connected", "Noop").changed());
        assert!(change("Ringing", "Connected", "CallConnected").changed());
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::with_limit(5);
        history.record(change("OffHook", "Ringing", "CallDialed"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
        assert_eq!(deserialized.limit(), Some(5));
    }
}
