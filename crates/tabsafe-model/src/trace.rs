//! Bounded diagnostic trail for intercepted faults.
//!
//! Entries are in-memory only and never drive control flow; they exist so a
//! suppressed fault can still be investigated later.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which interception point recorded the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaultKind {
    /// Top-level error channel.
    UncaughtError,
    /// Top-level rejection channel (asynchronous form of the same fault).
    UnhandledRejection,
    /// Existence-check primitive invoked on a non-collection.
    ExistenceCheck,
    /// Key-enumeration primitive invoked on a non-record.
    KeyEnumeration,
    /// Value-enumeration primitive invoked on a non-record.
    ValueEnumeration,
}

/// One intercepted fault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyTrace {
    pub when: DateTime<Utc>,
    pub kind: FaultKind,
    /// Short description of the offending value or message, for diagnostics.
    pub offending: String,
}

/// Default number of entries retained before the oldest is evicted.
pub const TRACE_CAPACITY: usize = 100;

/// Ring buffer of [`AnomalyTrace`] entries. Cleared on process restart;
/// never persisted.
#[derive(Debug, Default)]
pub struct TraceLog {
    entries: VecDeque<AnomalyTrace>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, timestamped now, evicting the oldest at capacity.
    pub fn record(&mut self, kind: FaultKind, offending: impl Into<String>) {
        if self.entries.len() == TRACE_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(AnomalyTrace {
            when: Utc::now(),
            kind,
            offending: offending.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&AnomalyTrace> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnomalyTrace> {
        self.entries.iter()
    }

    /// Snapshot of the entries, oldest first.
    pub fn to_vec(&self) -> Vec<AnomalyTrace> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_appends_and_timestamps() {
        let mut log = TraceLog::new();
        assert!(log.is_empty());
        log.record(FaultKind::ExistenceCheck, "receiver was null");
        assert_eq!(log.len(), 1);
        let entry = log.latest().expect("entry present");
        assert_eq!(entry.kind, FaultKind::ExistenceCheck);
        assert_eq!(entry.offending, "receiver was null");
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut log = TraceLog::new();
        for i in 0..TRACE_CAPACITY + 5 {
            log.record(FaultKind::UncaughtError, format!("fault {i}"));
        }
        assert_eq!(log.len(), TRACE_CAPACITY);
        let first = log.iter().next().expect("first entry");
        assert_eq!(first.offending, "fault 5");
    }
}
