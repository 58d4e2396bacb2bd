//! Merge run result types.

/// Counts and timing for a successful merge run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeSummary {
    pub rows_read: u64,
    pub rows_written: u64,
    /// Rows written with blank status because their lookup failed.
    pub lookups_failed: u64,
    pub duration_secs: f64,
}

impl MergeSummary {
    /// Rows whose lookup succeeded.
    #[must_use]
    pub fn rows_enriched(&self) -> u64 {
        self.rows_written.saturating_sub(self.lookups_failed)
    }
}
