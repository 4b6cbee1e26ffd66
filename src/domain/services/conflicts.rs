use chrono::NaiveTime;
use crate::domain::models::entry::ScheduledEntry;

/// Half-open interval overlap: touching ends do not overlap.
pub fn overlaps(a_start: NaiveTime, a_end: NaiveTime, b_start: NaiveTime, b_end: NaiveTime) -> bool {
    a_start < b_end && b_start < a_end
}

/// Flags every entry that overlaps another entry of the slice.
///
/// Callers pass the entries of one person on one date. The result is aligned
/// with the input. Flags are advisory and never block a write.
pub fn flag_conflicts(entries: &[&ScheduledEntry]) -> Vec<bool> {
    let mut flags = vec![false; entries.len()];
    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let (a, b) = (&entries[i].entry, &entries[j].entry);
            if a.date == b.date && overlaps(a.start_time, a.end_time, b.start_time, b.end_time) {
                flags[i] = true;
                flags[j] = true;
            }
        }
    }
    flags
}
