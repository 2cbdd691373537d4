//! # whenami-core
//!
//! Timezone-correct free/busy availability engine for multi-calendar schedules.
//!
//! Combines busy-time data from multiple calendars (potentially in different
//! timezones) into a single, correctly ordered timeline of free and busy
//! intervals, then renders that timeline under a caller-selected hours filter
//! and an optional output timezone. The whole pipeline is synchronous and
//! CPU-bound: every stage is a pure function from inputs to outputs, with no
//! ambient clock, locks, or state surviving across invocations.
//!
//! ## Modules
//!
//! - [`window`] — date selector + reference "now" → UTC range and day buckets
//! - [`normalize`] — raw per-calendar events → UTC busy intervals
//! - [`merge`] — sweep-line union of busy intervals across calendars
//! - [`freeslots`] — complement of busy time within hour-filtered day bounds
//! - [`format`] — final intervals → display records in the output timezone
//! - [`types`] — shared data model
//! - [`error`] — error types
//!
//! ## Pipeline
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use whenami_core::{compute_availability, CalendarSource, EngineConfig, Query};
//!
//! let calendars: Vec<CalendarSource> = vec![];
//! let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
//! let report =
//!     compute_availability(&calendars, &Query::default(), &EngineConfig::default(), now)
//!         .unwrap();
//! assert_eq!(report.total_busy_minutes, 0);
//! ```

pub mod error;
pub mod format;
pub mod freeslots;
pub mod merge;
pub mod normalize;
pub mod types;
pub mod window;

pub use error::{AvailabilityError, Result};
pub use freeslots::derive_free;
pub use merge::merge_intervals;
pub use types::{
    parse_timezone, AvailabilityReport, BusyInterval, CalendarSource, DateSelector, DisplayRecord,
    EngineConfig, EventTime, FreeSlot, HoursChoice, HoursFilter, MidDayBreak, OutputMode, Query,
    SlotKind, SourceEvent, TimeRange,
};
pub use window::{resolve, TimeWindow};

use chrono::{DateTime, Utc};

/// Run the full availability pipeline for one query.
///
/// Resolves the query window, normalizes every calendar's events into UTC,
/// merges the busy intervals, derives free slots against the hour-filtered
/// day buckets, and formats the result in the output timezone.
///
/// Malformed events and unresolvable calendar timezones degrade into
/// warnings on the report; only date-selector problems abort the run.
///
/// # Errors
/// `InvalidDateFormat` / `InvalidRange` from window resolution.
pub fn compute_availability(
    calendars: &[CalendarSource],
    query: &Query,
    config: &EngineConfig,
    reference_now: DateTime<Utc>,
) -> Result<AvailabilityReport> {
    let window = window::resolve(
        &query.selector,
        reference_now,
        config.default_timezone,
        config.week_start,
        query.work_days_only,
    )?;

    let mut intervals = Vec::new();
    let mut warnings = Vec::new();
    for calendar in calendars {
        let (normalized, warns) = normalize::normalize_calendar(calendar);
        intervals.extend(normalized);
        warnings.extend(warns);
    }

    let merged = merge::merge_intervals(intervals);
    let busy = merge::clip_intervals(&merged, &window.range);

    // The hours filter (and the final report) live in the output timezone;
    // day-bucket boundaries stay in the resolver's default timezone.
    let output_tz = query.output_timezone.unwrap_or(config.default_timezone);
    let hours = match query.hours {
        HoursChoice::Work => Some(&config.work_hours),
        HoursChoice::Personal => Some(&config.personal_hours),
        HoursChoice::All => None,
    };
    let free = freeslots::derive_free(
        &busy,
        &window.days,
        hours,
        output_tz,
        config.minimum_slot_minutes,
    );

    let total_busy_minutes = busy.iter().map(|iv| iv.range.duration_minutes()).sum();
    let total_free_minutes = free.iter().map(|slot| slot.range.duration_minutes()).sum();
    let records = format::format_report(&busy, &free, query, output_tz);

    Ok(AvailabilityReport {
        window: window.range,
        records,
        total_busy_minutes,
        total_free_minutes,
        warnings,
    })
}
