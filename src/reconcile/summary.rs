use crate::reconcile::upsert::UpsertOutcome;
use std::fmt;

/// Counters for one reconciliation cycle, reported by the job runner at the
/// end of the run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub fetched: usize,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub pruned: usize,
}

impl CycleSummary {
    pub fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Inserted => self.inserted += 1,
            UpsertOutcome::Updated => self.updated += 1,
            UpsertOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

impl fmt::Display for CycleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fetched, {} inserted, {} updated, {} unchanged, {} skipped, {} pruned",
            self.fetched, self.inserted, self.updated, self.unchanged, self.skipped, self.pruned
        )
    }
}
