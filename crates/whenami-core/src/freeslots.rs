//! Free-slot derivation — the complement of busy time within bounded windows.
//!
//! Each day bucket is first narrowed by the active hours filter, evaluated on
//! that day's local date in the filter timezone (a multi-day query therefore
//! applies the filter per calendar day, not once across the whole span). The
//! busy sequence and the bound are then walked together, emitting the gaps
//! before, between, and after busy intervals.

use chrono::Duration;
use chrono_tz::Tz;

use crate::types::{BusyInterval, FreeSlot, HoursFilter, TimeRange};
use crate::window::local_instant;

/// The bounded search window(s) for one day bucket.
///
/// Without a filter the whole bucket is searchable. With one, the bucket is
/// narrowed to the local `[start, end)` clock window; a configured mid-day
/// break splits that into a before-break and an after-break window.
pub fn day_bounds(day: &TimeRange, hours: Option<&HoursFilter>, tz: Tz) -> Vec<TimeRange> {
    let Some(filter) = hours else {
        return vec![*day];
    };

    // The bucket's midpoint picks the right local date even when the filter
    // timezone sits east or west of the zone the bucket was built in.
    let midpoint = day.start + (day.end - day.start) / 2;
    let local_date = midpoint.with_timezone(&tz).date_naive();
    let window = |start, end| {
        let range = TimeRange {
            start: local_instant(tz, local_date.and_time(start)),
            end: local_instant(tz, local_date.and_time(end)),
        };
        (range.start < range.end).then_some(range)
    };

    let windows = match filter.mid_day_break {
        Some(brk) => vec![
            window(filter.start, brk.start),
            window(brk.end, filter.end),
        ],
        None => vec![window(filter.start, filter.end)],
    };

    windows
        .into_iter()
        .flatten()
        .filter_map(|w| w.intersect(day))
        .collect()
}

/// Derive free slots from merged busy intervals across a set of day buckets.
///
/// `busy` must be the merge engine's output (sorted, non-overlapping). Slots
/// shorter than `min_minutes` are dropped — a presentation cutoff only: two
/// short gaps on either side of a tiny busy interval are two drops, never
/// re-joined into one larger slot. A fully covered bound yields no slots,
/// which is a valid "no free time" result, not an error.
pub fn derive_free(
    busy: &[BusyInterval],
    days: &[TimeRange],
    hours: Option<&HoursFilter>,
    tz: Tz,
    min_minutes: i64,
) -> Vec<FreeSlot> {
    let min_duration = Duration::minutes(min_minutes);
    let mut slots = Vec::new();
    for day in days {
        for bound in day_bounds(day, hours, tz) {
            gaps_within(busy, &bound, &mut slots);
        }
    }
    slots.retain(|slot| slot.range.duration() >= min_duration);
    slots
}

/// Emit the gaps the busy sequence leaves inside one bound. Busy intervals
/// partially overlapping the bound are clipped at its edges.
fn gaps_within(busy: &[BusyInterval], bound: &TimeRange, out: &mut Vec<FreeSlot>) {
    let mut cursor = bound.start;
    for interval in busy {
        if interval.range.end <= bound.start {
            continue;
        }
        if interval.range.start >= bound.end {
            break;
        }
        let busy_start = interval.range.start.max(bound.start);
        if cursor < busy_start {
            out.push(FreeSlot {
                range: TimeRange::new(cursor, busy_start),
            });
        }
        cursor = cursor.max(interval.range.end.min(bound.end));
    }
    // Trailing gap after the last busy interval.
    if cursor < bound.end {
        out.push(FreeSlot {
            range: TimeRange::new(cursor, bound.end),
        });
    }
}
