//! Interval merging — the union of busy time across all calendars.
//!
//! Classic sweep-line interval union: sort by start (tie-break on end), scan
//! once with an accumulator, extend it while the next interval starts at or
//! before the accumulator's end. Touching intervals merge, so the output is
//! sorted, pairwise non-overlapping, AND non-adjacent: for consecutive output
//! intervals `a`, `b` it always holds that `a.end < b.start`.
//!
//! The result is independent of input order — merging is commutative and
//! associative over the input multiset, so it does not matter how the
//! per-calendar lists were interleaved upstream.

use crate::types::{BusyInterval, TimeRange};

/// Merge an unordered collection of busy intervals into a minimal sorted
/// sequence of non-overlapping, non-touching intervals.
///
/// Contributor titles are unioned in first-seen order when intervals
/// coalesce; exact duplicates are kept once. Zero-length intervals denote no
/// time and are discarded up front. O(n log n), dominated by the sort.
pub fn merge_intervals(mut intervals: Vec<BusyInterval>) -> Vec<BusyInterval> {
    intervals.retain(|iv| !iv.range.is_empty());
    intervals.sort_by_key(|iv| (iv.range.start, iv.range.end));

    let mut merged: Vec<BusyInterval> = Vec::new();
    for interval in intervals {
        if let Some(current) = merged.last_mut() {
            // Touching counts as overlap: [9,10) and [10,11) become [9,11).
            if interval.range.start <= current.range.end {
                current.range.end = current.range.end.max(interval.range.end);
                for title in interval.contributors {
                    if !current.contributors.contains(&title) {
                        current.contributors.push(title);
                    }
                }
                continue;
            }
        }
        merged.push(interval);
    }
    merged
}

/// Clip merged intervals to a bound, discarding those entirely outside it.
///
/// Contributors are kept as-is — a partially clipped interval still owes its
/// time to the same source events.
pub fn clip_intervals(intervals: &[BusyInterval], bound: &TimeRange) -> Vec<BusyInterval> {
    intervals
        .iter()
        .filter_map(|iv| {
            iv.range.intersect(bound).map(|range| BusyInterval {
                range,
                contributors: iv.contributors.clone(),
            })
        })
        .collect()
}
