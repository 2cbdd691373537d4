//! Event normalization — raw per-calendar events into UTC busy intervals.
//!
//! Timed events already carry their own offset, so conversion is a plain
//! frame change; the offset in effect at the event's own start instant is the
//! one that applies, which keeps pre/post-DST events correct. All-day events
//! carry only a local date and are anchored to midnight in the calendar's
//! native timezone before conversion.

use chrono::{Duration, Utc};
use chrono_tz::Tz;

use crate::error::{AvailabilityError, Result};
use crate::types::{parse_timezone, BusyInterval, CalendarSource, EventTime, SourceEvent, TimeRange};
use crate::window::local_midnight;

/// Normalize a single event against its calendar's native timezone.
///
/// # Errors
/// `MalformedEvent` for negative-duration events or events mixing timed and
/// all-day endpoints. Sub-minute precision is preserved; nothing is clamped.
pub fn normalize_event(event: &SourceEvent, tz: Tz) -> Result<BusyInterval> {
    let range = match (event.start, event.end) {
        (EventTime::Timed(start), EventTime::Timed(end)) => {
            let (start, end) = (start.with_timezone(&Utc), end.with_timezone(&Utc));
            if end < start {
                return Err(malformed(event, "event ends before it starts"));
            }
            TimeRange::new(start, end)
        }
        (EventTime::AllDay(start), EventTime::AllDay(end)) => {
            if end < start {
                return Err(malformed(event, "event ends before it starts"));
            }
            // End date is inclusive: a single-day event has start == end and
            // spans that full local day.
            TimeRange::new(
                local_midnight(tz, start),
                local_midnight(tz, end + Duration::days(1)),
            )
        }
        _ => return Err(malformed(event, "mixed timed and all-day endpoints")),
    };

    let contributors = if event.title.is_empty() {
        Vec::new()
    } else {
        vec![event.title.clone()]
    };

    Ok(BusyInterval {
        range,
        contributors,
    })
}

fn malformed(event: &SourceEvent, reason: &str) -> AvailabilityError {
    AvailabilityError::MalformedEvent {
        title: event.title.clone(),
        reason: reason.to_string(),
    }
}

/// Normalize every event of one calendar.
///
/// Failure is local, never fatal: a malformed event is skipped with a warning
/// attributed to its calendar, and an unresolvable calendar timezone skips
/// the whole calendar the same way.
pub fn normalize_calendar(calendar: &CalendarSource) -> (Vec<BusyInterval>, Vec<String>) {
    let tz = match parse_timezone(&calendar.timezone) {
        Ok(tz) => tz,
        Err(err) => {
            return (
                Vec::new(),
                vec![format!(
                    "calendar '{}': {err}; skipping {} event(s)",
                    calendar.display_name(),
                    calendar.events.len()
                )],
            );
        }
    };

    let mut intervals = Vec::with_capacity(calendar.events.len());
    let mut warnings = Vec::new();
    for event in &calendar.events {
        match normalize_event(event, tz) {
            Ok(interval) => intervals.push(interval),
            Err(err) => warnings.push(format!(
                "calendar '{}': {err}; event skipped",
                calendar.display_name()
            )),
        }
    }
    (intervals, warnings)
}
