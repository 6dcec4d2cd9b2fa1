//! Summary counts over a collection.

use crate::collection::Collection;
use crate::record::Attendance;
use serde::Serialize;

/// Response counts, split by attendance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCounts {
    /// Number of attending responses.
    pub attending_count: u64,
    /// Number of declined responses.
    pub not_attending_count: u64,
    /// People across attending responses.
    pub attending_persons: u64,
    /// People across declined responses.
    pub not_attending_persons: u64,
    /// Number of responses.
    pub total_records: u64,
    /// People across all responses.
    pub total_persons: u64,
}

/// Counts records by attendance and sums party sizes in each group.
pub fn summarize(collection: &Collection) -> AggregateCounts {
    let mut counts = AggregateCounts::default();

    for record in collection {
        let persons = u64::from(record.party_size());
        match record.attendance() {
            Attendance::Attending => {
                counts.attending_count += 1;
                counts.attending_persons += persons;
            }
            Attendance::NotAttending => {
                counts.not_attending_count += 1;
                counts.not_attending_persons += persons;
            }
        }
    }

    counts.total_records = counts.attending_count + counts.not_attending_count;
    counts.total_persons = counts.attending_persons + counts.not_attending_persons;
    counts
}
