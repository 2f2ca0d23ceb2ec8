//! Recent non-fatal failures kept for client visibility

use std::{collections::VecDeque, sync::Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many failures are retained before the oldest is dropped
pub const MAX_DIAGNOSTICS: usize = 50;

/// A single recorded failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    /// Subsystem that failed, e.g. "settings" or "activity"
    pub component: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded, thread-safe log of persistence and delivery failures.
///
/// Nothing in here is ever surfaced as a blocking error; the list only feeds
/// the status endpoint.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Mutex<VecDeque<DiagnosticEntry>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for a component
    pub fn record(&self, component: &str, message: impl Into<String>) {
        let entry = DiagnosticEntry {
            component: component.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
        };
        if let Ok(mut entries) = self.entries.lock() {
            if entries.len() == MAX_DIAGNOSTICS {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }

    /// Newest-first copy of the recorded failures
    pub fn snapshot(&self) -> Vec<DiagnosticEntry> {
        self.entries
            .lock()
            .map(|entries| entries.iter().rev().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear failures recorded for a specific component
    pub fn clear_for(&self, component: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            let initial_count = entries.len();
            entries.retain(|entry| entry.component != component);
            if entries.len() != initial_count {
                tracing::info!(
                    "Cleared {} diagnostics for component: {}",
                    initial_count - entries.len(),
                    component
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_entries() {
        let diagnostics = Diagnostics::new();
        for i in 0..(MAX_DIAGNOSTICS + 5) {
            diagnostics.record("activity", format!("failure {}", i));
        }
        let entries = diagnostics.snapshot();
        assert_eq!(entries.len(), MAX_DIAGNOSTICS);
        assert_eq!(entries[0].message, format!("failure {}", MAX_DIAGNOSTICS + 4));
    }

    #[test]
    fn clear_for_only_drops_matching_component() {
        let diagnostics = Diagnostics::new();
        diagnostics.record("settings", "disk full");
        diagnostics.record("activity", "session missing");
        diagnostics.clear_for("settings");
        let entries = diagnostics.snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].component, "activity");
    }
}
