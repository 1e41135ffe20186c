//! Date relabeling for history windows.
//!
//! Stored dates are not trusted as "days ago" markers (seed data, batch
//! ingestion). The chart contract is positional: the last point is today and
//! each point sits one calendar day before its right neighbour.

use crate::models::{CalendarDate, DatedRecord};

/// Relabel an oldest-first window so it ends at `today` with one-day spacing.
///
/// Element `i` of `n` gets `today - (n - 1 - i)` days. Order and measurements
/// are untouched.
pub fn reindex_to_today(records: Vec<DatedRecord>, today: CalendarDate) -> Vec<DatedRecord> {
    let n = records.len();
    records
        .into_iter()
        .enumerate()
        .map(|(i, mut record)| {
            record.date = today.minus_days((n - 1 - i) as u64);
            record
        })
        .collect()
}
