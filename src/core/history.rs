//! Dispatch history tracking.
//!
//! Provides immutable tracking of the transitions an instance has
//! committed, following functional programming principles: recording
//! returns a new log rather than mutating the old one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed dispatch.
///
/// Records are immutable values naming the states and operation involved,
/// so they stay meaningful after the machine that produced them is gone.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// State the instance was in when the operation arrived
    pub from: String,
    /// Operation that was dispatched
    pub operation: String,
    /// State the instance committed to
    pub to: String,
    /// When the commit happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed dispatches.
///
/// The log is immutable - `record` returns a new log with the entry
/// appended. Failed dispatches never appear here, since nothing committed.
///
/// # Example
///
/// ```rust
/// use typemachine::core::{DispatchLog, DispatchRecord};
/// use chrono::Utc;
///
/// let log = DispatchLog::new();
/// let log = log.record(DispatchRecord {
///     from: "off".to_string(),
///     operation: "flip".to_string(),
///     to: "on".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.records().len(), 1);
/// assert_eq!(log.path(), vec!["off", "on"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DispatchLog {
    records: Vec<DispatchRecord>,
}

impl Default for DispatchLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a dispatch, returning a new log.
    ///
    /// This is a pure function - the existing log is left untouched.
    pub fn record(&self, record: DispatchRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// Get all records in commit order.
    pub fn records(&self) -> &[DispatchRecord] {
        &self.records
    }

    /// Get the path of states traversed: the first record's source state,
    /// then the target of every record. Empty if nothing committed yet.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Calculate total duration from first to last commit.
    ///
    /// Returns `None` if there are no records.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flip(from: &str, to: &str) -> DispatchRecord {
        DispatchRecord {
            from: from.to_string(),
            operation: "flip".to_string(),
            to: to.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log = DispatchLog::new();
        assert_eq!(log.records().len(), 0);
        assert!(log.path().is_empty());
        assert!(log.duration().is_none());
    }

    #[test]
    fn record_adds_entry() {
        let log = DispatchLog::new().record(flip("off", "on"));
        assert_eq!(log.records().len(), 1);
        assert_eq!(log.records()[0].operation, "flip");
    }

    #[test]
    fn record_is_immutable() {
        let log = DispatchLog::new();
        let new_log = log.record(flip("off", "on"));

        assert_eq!(log.records().len(), 0);
        assert_eq!(new_log.records().len(), 1);
    }

    #[test]
    fn path_returns_state_sequence() {
        let log = DispatchLog::new()
            .record(flip("off", "on"))
            .record(flip("on", "off"));

        assert_eq!(log.path(), vec!["off", "on", "off"]);
    }

    #[test]
    fn path_keeps_self_transitions() {
        let log = DispatchLog::new()
            .record(flip("on", "on"))
            .record(flip("on", "off"));

        assert_eq!(log.path(), vec!["on", "on", "off"]);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let log = DispatchLog::new().record(flip("off", "on"));

        std::thread::sleep(Duration::from_millis(10));

        let log = log.record(flip("on", "off"));

        let duration = log.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= Duration::from_millis(10));
    }

    #[test]
    fn single_record_has_duration_zero() {
        let log = DispatchLog::new().record(flip("off", "on"));
        assert_eq!(log.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn log_serializes_correctly() {
        let log = DispatchLog::new().record(flip("off", "on"));

        let json = serde_json::to_string(&log).unwrap();
        let deserialized: DispatchLog = serde_json::from_str(&json).unwrap();

        assert_eq!(log.records().len(), deserialized.records().len());
        assert_eq!(deserialized.records()[0].from, "off");
    }
}
