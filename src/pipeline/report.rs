use crate::aggregate::AggregateSummary;
use crate::pipeline::EntryReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Per-entry outcomes plus the aggregation result for one complete run.
///
/// Callers assert on this programmatically instead of parsing log output;
/// in JSON output mode it is printed verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub duration: Duration,
    pub entries: Vec<EntryReport>,
    pub aggregate: AggregateSummary,
}

impl RunReport {
    pub fn entries_succeeded(&self) -> usize {
        self.entries.len() - self.entries_failed()
    }

    pub fn entries_failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome.is_failed())
            .count()
    }

    pub fn failed_entries(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries.iter().filter(|e| e.outcome.is_failed())
    }
}
