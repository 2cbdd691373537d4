//! Presentation formatting — final intervals into ordered display records.
//!
//! This is the only place where the output timezone touches the data: every
//! upstream stage works in UTC with explicit zone parameters, and conversion
//! happens here, at the last boundary before the caller.

use chrono_tz::Tz;

use crate::types::{BusyInterval, DisplayRecord, FreeSlot, OutputMode, Query, SlotKind};

/// Convert final busy and free intervals into display records in the
/// requested output timezone.
///
/// In `BothSplit` mode the records form two ordered groups — busy first,
/// then free — rather than one interleaved timeline. With `show_event_names`
/// a busy record carries the comma-separated titles of every contributing
/// event, in first-seen order; when several distinct titles collapsed into
/// one merged interval, all of them are shown.
pub fn format_report(
    busy: &[BusyInterval],
    free: &[FreeSlot],
    query: &Query,
    output_tz: Tz,
) -> Vec<DisplayRecord> {
    let busy_records = busy
        .iter()
        .map(|iv| DisplayRecord {
            kind: SlotKind::Busy,
            start: iv.range.start.with_timezone(&output_tz),
            end: iv.range.end.with_timezone(&output_tz),
            duration_minutes: iv.range.duration_minutes(),
            label: (query.show_event_names && !iv.contributors.is_empty())
                .then(|| iv.contributors.join(", ")),
        });
    let free_records = free.iter().map(|slot| DisplayRecord {
        kind: SlotKind::Free,
        start: slot.range.start.with_timezone(&output_tz),
        end: slot.range.end.with_timezone(&output_tz),
        duration_minutes: slot.range.duration_minutes(),
        label: None,
    });

    match query.mode {
        OutputMode::Free => free_records.collect(),
        OutputMode::Busy => busy_records.collect(),
        OutputMode::BothSplit => busy_records.chain(free_records).collect(),
    }
}
